use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MixerError;

/// Length of a track, written as `minutes:seconds` (e.g. `6:23`)
///
/// Only the canonical form is accepted: minutes without leading zeros and
/// exactly two seconds digits below 60, so parsing and formatting are exact
/// inverses of each other.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TrackDuration {
    seconds: u64,
}

impl TrackDuration {
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Saturates at `u64::MAX` seconds
    pub fn from_minutes_seconds(minutes: u64, seconds: u64) -> Self {
        Self {
            seconds: minutes.saturating_mul(60).saturating_add(seconds),
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.seconds
    }

    pub fn minutes(&self) -> u64 {
        self.seconds / 60
    }

    pub fn seconds(&self) -> u64 {
        self.seconds % 60
    }

    /// Summary form used for whole playlists: `1h 5m` or `9m`
    ///
    /// Leftover seconds are dropped, so `9:30` reads as `9m`.
    pub fn display_total(&self) -> String {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;

        if hours > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{minutes}m")
        }
    }
}

impl fmt::Display for TrackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes(), self.seconds())
    }
}

impl FromStr for TrackDuration {
    type Err = MixerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MixerError::InvalidDuration(s.to_string());

        let (minutes, seconds) = s.split_once(':').ok_or_else(invalid)?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(minutes) || !all_digits(seconds) {
            return Err(invalid());
        }
        // "07:00" would format back as "7:00"
        if minutes.len() > 1 && minutes.starts_with('0') {
            return Err(invalid());
        }
        if seconds.len() != 2 {
            return Err(invalid());
        }

        let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
        if seconds >= 60 {
            return Err(invalid());
        }

        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .map(TrackDuration::from_seconds)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for TrackDuration {
    type Error = MixerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackDuration> for String {
    fn from(value: TrackDuration) -> Self {
        value.to_string()
    }
}

// Saturating, since catalog text can name arbitrarily long durations
impl Sum for TrackDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let seconds = iter.fold(0u64, |total, d| total.saturating_add(d.seconds));
        TrackDuration::from_seconds(seconds)
    }
}

impl<'a> Sum<&'a TrackDuration> for TrackDuration {
    fn sum<I: Iterator<Item = &'a TrackDuration>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

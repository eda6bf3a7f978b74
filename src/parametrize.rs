use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{MixerError, Result};
use crate::models::Source;
use crate::playlist::MixLimits;

/// One editable mixing parameter of a track
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackParameter {
    Weight(f64),
    Required(bool),
    AllowRepeated(bool),
}

/// Names one track of one source, written `SOURCE:TRACK`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackRef {
    pub source_id: String,
    pub track_id: String,
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_id, self.track_id)
    }
}

impl FromStr for TrackRef {
    type Err = MixerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((source_id, track_id))
                if !source_id.is_empty() && !track_id.is_empty() && !track_id.contains(':') =>
            {
                Ok(TrackRef {
                    source_id: source_id.to_string(),
                    track_id: track_id.to_string(),
                })
            }
            _ => Err(MixerError::InvalidTrackRef(s.to_string())),
        }
    }
}

/// A weight edit written `SOURCE:TRACK=WEIGHT`
#[derive(Debug, Clone, PartialEq)]
pub struct WeightAssignment {
    pub track: TrackRef,
    pub weight: f64,
}

impl FromStr for WeightAssignment {
    type Err = MixerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MixerError::InvalidWeightAssignment(s.to_string());

        let (track, weight) = s.split_once('=').ok_or_else(invalid)?;
        let track: TrackRef = track.parse().map_err(|_| invalid())?;
        let weight: f64 = weight.trim().parse().map_err(|_| invalid())?;

        Ok(WeightAssignment { track, weight })
    }
}

/// Return a copy of `sources` with one parameter of one track changed
///
/// The input is left untouched. Weights are snapped to the limits' step and
/// rejected outside their range.
pub fn parametrize(
    sources: &[Source],
    track: &TrackRef,
    parameter: TrackParameter,
    limits: &MixLimits,
) -> Result<Vec<Source>> {
    let parameter = match parameter {
        TrackParameter::Weight(weight) => TrackParameter::Weight(limits.snap_weight(weight)?),
        other => other,
    };

    let source = sources
        .iter()
        .find(|source| source.id == track.source_id)
        .ok_or_else(|| MixerError::UnknownSource(track.source_id.clone()))?;
    if source.track(&track.track_id).is_none() {
        return Err(MixerError::UnknownTrack {
            source_id: track.source_id.clone(),
            track_id: track.track_id.clone(),
        });
    }

    debug!("Setting {parameter:?} on track {track}");

    let mut updated = sources.to_vec();
    for source in updated.iter_mut().filter(|source| source.id == track.source_id) {
        for music in source.musics.iter_mut().filter(|music| music.id == track.track_id) {
            match parameter {
                TrackParameter::Weight(weight) => music.weight = weight,
                TrackParameter::Required(is_required) => music.is_required = is_required,
                TrackParameter::AllowRepeated(allow_repeated) => {
                    music.allow_repeated = allow_repeated
                }
            }
        }
    }
    Ok(updated)
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::duration::TrackDuration;

fn default_weight() -> f64 {
    1.0
}

/// A single playable item together with its mixing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration: TrackDuration,
    #[serde(default = "default_weight")]
    pub weight: f64, // Relative chance of being drawn, must be > 0
    #[serde(default)]
    pub is_required: bool, // Always placed, bypassing the weighted draw
    #[serde(default)]
    pub allow_repeated: bool, // May be drawn more than once per playlist
}

impl Track {
    /// Create a track with the default parameters (weight 1, optional, no repeats)
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: TrackDuration,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            duration,
            weight: default_weight(),
            is_required: false,
            allow_repeated: false,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn repeatable(mut self, allow_repeated: bool) -> Self {
        self.allow_repeated = allow_repeated;
        self
    }
}

/// Kind of catalog grouping a source represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Album,
    Playlist,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Album => write!(f, "album"),
            SourceType::Playlist => write!(f, "playlist"),
        }
    }
}

/// A named grouping of tracks (album or playlist)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>, // Albums only
    #[serde(default)]
    pub cover: String, // Opaque image reference, never interpreted
    #[serde(default)]
    pub musics: Vec<Track>,
}

impl Source {
    pub fn new(id: impl Into<String>, name: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_type,
            artist: None,
            cover: String::new(),
            musics: Vec::new(),
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.musics = tracks;
        self
    }

    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.musics.iter().find(|track| track.id == track_id)
    }

    /// Total length of every track in this source
    pub fn total_duration(&self) -> TrackDuration {
        self.musics.iter().map(|track| &track.duration).sum()
    }
}

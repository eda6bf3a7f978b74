use serde::{Deserialize, Serialize};

use crate::duration::TrackDuration;
use crate::models::{Source, SourceType, Track};

/// A track placed in a generated playlist, carrying where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedEntry {
    #[serde(flatten)]
    pub track: Track,
    pub source_id: String,
    pub source_name: String,
    pub source_type: SourceType,
}

impl GeneratedEntry {
    pub fn from_source(source: &Source, track: &Track) -> Self {
        Self {
            track: track.clone(),
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            source_type: source.source_type,
        }
    }
}

/// How many entries of a playlist came from one input source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCount {
    pub source_id: String,
    pub source_name: String,
    pub source_type: SourceType,
    pub count: usize,
}

/// Metadata about the playlist composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMetadata {
    pub total_tracks: usize,
    pub total_duration: TrackDuration,
    pub source_counts: Vec<SourceCount>, // One per input source, in input order
}

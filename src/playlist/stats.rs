use super::metadata::{GeneratedEntry, PlaylistMetadata, SourceCount};
use crate::duration::TrackDuration;
use crate::models::Source;

/// Statistics derived from a generated playlist
pub struct PlaylistStats;

impl PlaylistStats {
    /// Calculate metadata for a generated playlist
    pub fn calculate_metadata(entries: &[GeneratedEntry], sources: &[Source]) -> PlaylistMetadata {
        PlaylistMetadata {
            total_tracks: entries.len(),
            total_duration: Self::total_duration(entries),
            source_counts: Self::source_counts(entries, sources),
        }
    }

    pub fn total_duration(entries: &[GeneratedEntry]) -> TrackDuration {
        entries.iter().map(|entry| &entry.track.duration).sum()
    }

    /// Entry count for every input source, including sources with no entries
    pub fn source_counts(entries: &[GeneratedEntry], sources: &[Source]) -> Vec<SourceCount> {
        sources
            .iter()
            .map(|source| SourceCount {
                source_id: source.id.clone(),
                source_name: source.name.clone(),
                source_type: source.source_type,
                count: entries
                    .iter()
                    .filter(|entry| entry.source_id == source.id)
                    .count(),
            })
            .collect()
    }
}

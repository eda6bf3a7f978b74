use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use super::metadata::GeneratedEntry;
use super::pool::CandidatePool;
use crate::error::{MixerError, Result};
use crate::models::Source;

/// Main playlist generator
pub struct PlaylistGenerator;

impl PlaylistGenerator {
    /// Generate a shuffled playlist from the tracks of `sources`
    ///
    /// Required tracks are always placed once, even past `target_size`. The
    /// remaining slots are filled by weighted draws over the other tracks; a
    /// track that does not allow repeats leaves the pool once drawn, so the
    /// result is shorter than `target_size` when the pool runs dry.
    ///
    /// The sources are only read; every run works on its own copy of the
    /// candidate pool. All randomness comes from `rng`, so a seeded generator
    /// reproduces the same playlist.
    pub fn generate<R: Rng + ?Sized>(
        sources: &[Source],
        target_size: usize,
        rng: &mut R,
    ) -> Result<Vec<GeneratedEntry>> {
        Self::validate_sources(sources)?;

        let candidates = Self::flatten(sources);
        let (required, fillable): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|entry| entry.track.is_required);

        Self::validate_weights(&fillable)?;

        let mut playlist = required;
        let required_count = playlist.len();
        if required_count > target_size {
            warn!(
                "{required_count} required tracks exceed the target size of {target_size}; \
                 all of them are kept"
            );
        }

        let remaining_slots = target_size.saturating_sub(required_count);
        let mut pool = CandidatePool::new(fillable);
        debug!(
            "Placed {required_count} required tracks, \
             filling {remaining_slots} slots from {} candidates",
            pool.len()
        );

        for _ in 0..remaining_slots {
            match pool.draw(rng) {
                Some(entry) => playlist.push(entry),
                None => {
                    debug!("Candidate pool exhausted after {} tracks", playlist.len());
                    break;
                }
            }
        }

        playlist.shuffle(rng);

        debug!("Generated playlist with {} tracks", playlist.len());
        Ok(playlist)
    }

    /// Candidate pool in source-major order, tracks in their source order
    fn flatten(sources: &[Source]) -> Vec<GeneratedEntry> {
        sources
            .iter()
            .flat_map(|source| {
                source
                    .musics
                    .iter()
                    .map(move |track| GeneratedEntry::from_source(source, track))
            })
            .collect()
    }

    fn validate_sources(sources: &[Source]) -> Result<()> {
        let mut source_ids = HashSet::new();
        for source in sources {
            if !source_ids.insert(source.id.as_str()) {
                return Err(MixerError::DuplicateSource(source.id.clone()));
            }

            let mut track_ids = HashSet::new();
            for track in &source.musics {
                if !track_ids.insert(track.id.as_str()) {
                    return Err(MixerError::DuplicateTrack {
                        source_id: source.id.clone(),
                        track_id: track.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Required tracks never reach the weighted draw, so only these are checked
    fn validate_weights(fillable: &[GeneratedEntry]) -> Result<()> {
        match fillable
            .iter()
            .find(|entry| !(entry.track.weight.is_finite() && entry.track.weight > 0.0))
        {
            Some(entry) => Err(MixerError::InvalidWeight {
                source_id: entry.source_id.clone(),
                track_id: entry.track.id.clone(),
                weight: entry.track.weight,
            }),
            None => Ok(()),
        }
    }
}

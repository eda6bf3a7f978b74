use std::collections::HashSet;
use std::path::Path;

use log::{debug, info};

use crate::duration::TrackDuration;
use crate::error::{MixerError, Result};
use crate::models::{Source, SourceType, Track};
use crate::playlist::MixLimits;

/// The albums and playlists a mix can be built from
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub sources: Vec<Source>,
}

impl Catalog {
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// Load a catalog from a JSON array of sources
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let sources: Vec<Source> = serde_json::from_str(&content)?;
        info!("Loaded {} sources from {}", sources.len(), path.display());
        Ok(Self::new(sources))
    }

    pub fn find(&self, source_id: &str) -> Option<&Source> {
        self.sources.iter().find(|source| source.id == source_id)
    }

    /// Pick the sources to mix, in the order given
    ///
    /// Exactly `limits.source_count` distinct ids are required.
    pub fn select_sources<S: AsRef<str>>(
        &self,
        ids: &[S],
        limits: &MixLimits,
    ) -> Result<Vec<Source>> {
        let mut seen = HashSet::new();
        if let Some(repeated) = ids.iter().map(|id| id.as_ref()).find(|id| !seen.insert(*id)) {
            return Err(MixerError::DuplicateSource(repeated.to_string()));
        }
        if ids.len() != limits.source_count {
            return Err(MixerError::SourceCount {
                expected: limits.source_count,
                actual: ids.len(),
            });
        }

        let selected = ids
            .iter()
            .map(|id| {
                self.find(id.as_ref())
                    .cloned()
                    .ok_or_else(|| MixerError::UnknownSource(id.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Selected sources: {}",
            selected
                .iter()
                .map(|source| source.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(selected)
    }

    /// Built-in catalog used when no catalog file is available
    pub fn sample() -> Self {
        fn track(id: &str, title: &str, artist: &str, minutes: u64, seconds: u64) -> Track {
            Track::new(id, title, artist, TrackDuration::from_minutes_seconds(minutes, seconds))
        }

        Self::new(vec![
            Source::new("1", "Abbey Road", SourceType::Album)
                .with_artist("The Beatles")
                .with_tracks(vec![
                    track("1", "Come Together", "The Beatles", 4, 19),
                    track("2", "Something", "The Beatles", 3, 3),
                    track("3", "Maxwell's Silver Hammer", "The Beatles", 3, 27),
                    track("4", "Oh! Darling", "The Beatles", 3, 26),
                    track("5", "Here Comes the Sun", "The Beatles", 3, 5),
                ]),
            Source::new("2", "Dark Side of the Moon", SourceType::Album)
                .with_artist("Pink Floyd")
                .with_tracks(vec![
                    track("6", "Speak to Me", "Pink Floyd", 1, 30),
                    track("7", "Breathe", "Pink Floyd", 2, 43),
                    track("8", "Time", "Pink Floyd", 6, 53),
                    track("9", "Money", "Pink Floyd", 6, 23),
                    track("10", "Us and Them", "Pink Floyd", 7, 49),
                ]),
            Source::new("3", "Rock Classics", SourceType::Playlist).with_tracks(vec![
                track("11", "Bohemian Rhapsody", "Queen", 5, 55),
                track("12", "Stairway to Heaven", "Led Zeppelin", 8, 2),
                track("13", "Hotel California", "Eagles", 6, 30),
                track("14", "Sweet Child O' Mine", "Guns N' Roses", 5, 3),
            ]),
            Source::new("4", "Chill Vibes", SourceType::Playlist).with_tracks(vec![
                track("15", "Weightless", "Marconi Union", 8, 10),
                track("16", "Clair de Lune", "Claude Debussy", 5, 20),
                track("17", "Mad World", "Gary Jules", 3, 7),
                track("18", "The Night We Met", "Lord Huron", 3, 28),
            ]),
        ])
    }
}

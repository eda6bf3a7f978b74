//! # Playlist Mixer
//!
//! Combines the tracks of two albums or playlists into one generated
//! playlist. Every track carries a relative weight, a "required" flag and an
//! "allow repeats" flag; the generator places required tracks, fills the
//! remaining slots with weighted random draws and shuffles the result.
//!
//! ## Architecture
//!
//! - `playlist`: the generator, its candidate pool, limits and statistics
//! - `models`: tracks and sources
//! - `duration`: `minutes:seconds` track lengths
//! - `catalog`: loading sources and selecting the two to mix
//! - `parametrize`: editing per-track parameters without mutating the input
//! - `config`: settings from the environment
//!
//! ## Usage
//!
//! ```
//! use playlist_mixer::catalog::Catalog;
//! use playlist_mixer::playlist::{MixLimits, PlaylistGenerator, PlaylistStats};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let sources = Catalog::sample().select_sources(&["1", "3"], &MixLimits::default())?;
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let playlist = PlaylistGenerator::generate(&sources, 5, &mut rng)?;
//! let metadata = PlaylistStats::calculate_metadata(&playlist, &sources);
//!
//! assert_eq!(metadata.total_tracks, 5);
//! # Ok::<(), playlist_mixer::error::MixerError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod duration;
pub mod error;
pub mod models;
pub mod parametrize;
pub mod playlist;

pub use error::{MixerError, Result};

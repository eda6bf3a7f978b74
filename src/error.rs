//! Error types for the playlist mixer
//!
//! Structural input problems are reported immediately so the caller can
//! surface a clear message. A playlist shorter than requested is not an error.

use thiserror::Error;

/// Main error type for the mixer library
#[derive(Error, Debug)]
pub enum MixerError {
    /// A target size arrived as a negative number
    #[error("Invalid target size {0}: the playlist size cannot be negative")]
    NegativeTargetSize(i64),

    /// A weighted candidate has a weight that cannot be sampled
    #[error(
        "Invalid weight {weight} for track '{track_id}' in source '{source_id}': \
         weights must be finite and greater than zero"
    )]
    InvalidWeight {
        source_id: String,
        track_id: String,
        weight: f64,
    },

    /// Two sources in one generation call share an id
    #[error("Duplicate source id '{0}'")]
    DuplicateSource(String),

    /// Two tracks inside one source share an id
    #[error("Duplicate track id '{track_id}' in source '{source_id}'")]
    DuplicateTrack { source_id: String, track_id: String },

    /// Text that is not a canonical minutes:seconds duration
    #[error("Invalid duration '{0}': expected minutes:seconds such as 3:07")]
    InvalidDuration(String),

    #[error("Unknown source '{0}'")]
    UnknownSource(String),

    #[error("Unknown track '{track_id}' in source '{source_id}'")]
    UnknownTrack { source_id: String, track_id: String },

    /// A mix must be built from a fixed number of distinct sources
    #[error("Expected exactly {expected} sources, got {actual}")]
    SourceCount { expected: usize, actual: usize },

    #[error("Weight {weight} is outside the allowed range {min}..={max}")]
    WeightOutOfRange { weight: f64, min: f64, max: f64 },

    #[error("Playlist size {size} is outside the allowed range {min}..={max}")]
    TargetSizeOutOfRange { size: i64, min: usize, max: usize },

    #[error("Invalid track reference '{0}': expected SOURCE:TRACK")]
    InvalidTrackRef(String),

    #[error("Invalid weight assignment '{0}': expected SOURCE:TRACK=WEIGHT")]
    InvalidWeightAssignment(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidSetting { key: String, value: String },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MixerError {
    /// True for the errors raised on structurally invalid generation input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            MixerError::NegativeTargetSize(_)
                | MixerError::InvalidWeight { .. }
                | MixerError::DuplicateSource(_)
                | MixerError::DuplicateTrack { .. }
                | MixerError::InvalidDuration(_)
        )
    }
}

/// Convenience Result type for mixer operations
pub type Result<T> = std::result::Result<T, MixerError>;

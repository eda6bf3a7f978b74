use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MixerError, Result};

/// Bounds the mixing front end puts on user input
///
/// The generator itself accepts any positive weight and any size; these
/// limits apply when tracks are parametrized and a mix is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixLimits {
    pub min_weight: f64,
    pub max_weight: f64,
    pub weight_step: f64,
    pub min_playlist_size: usize,
    pub max_playlist_size: usize,
    pub source_count: usize, // Distinct sources combined into one mix
}

impl Default for MixLimits {
    fn default() -> Self {
        Self {
            min_weight: 0.1,
            max_weight: 5.0,
            weight_step: 0.1,
            min_playlist_size: 1,
            max_playlist_size: 50,
            source_count: 2,
        }
    }
}

impl MixLimits {
    /// Load limits from a JSON object; missing fields keep their defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let limits: MixLimits = serde_json::from_str(&content)?;
        Ok(limits)
    }

    /// Snap a weight to the configured step and check it against the range
    pub fn snap_weight(&self, weight: f64) -> Result<f64> {
        let out_of_range = || MixerError::WeightOutOfRange {
            weight,
            min: self.min_weight,
            max: self.max_weight,
        };

        if !weight.is_finite() {
            return Err(out_of_range());
        }

        let snapped = if self.weight_step > 0.0 {
            let steps = (weight / self.weight_step).round();
            // Trim the float noise left by step multiplication (0.30000000000000004)
            (steps * self.weight_step * 1e9).round() / 1e9
        } else {
            weight
        };

        const TOLERANCE: f64 = 1e-9;
        if snapped < self.min_weight - TOLERANCE || snapped > self.max_weight + TOLERANCE {
            return Err(out_of_range());
        }
        Ok(snapped)
    }

    /// Check a requested playlist size, rejecting negative values outright
    pub fn check_playlist_size(&self, size: i64) -> Result<usize> {
        let size_unsigned =
            usize::try_from(size).map_err(|_| MixerError::NegativeTargetSize(size))?;

        if size_unsigned < self.min_playlist_size || size_unsigned > self.max_playlist_size {
            return Err(MixerError::TargetSizeOutOfRange {
                size,
                min: self.min_playlist_size,
                max: self.max_playlist_size,
            });
        }
        Ok(size_unsigned)
    }
}

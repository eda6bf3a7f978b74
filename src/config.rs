use std::path::PathBuf;

use anyhow::Result;

use crate::error::MixerError;

pub const CATALOG_VAR: &str = "MIXER_CATALOG";
pub const PLAYLIST_SIZE_VAR: &str = "MIXER_PLAYLIST_SIZE";
pub const SEED_VAR: &str = "MIXER_SEED";

const DEFAULT_CATALOG: &str = "catalog.json";
const DEFAULT_PLAYLIST_SIZE: usize = 10;

/// Settings loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub playlist_size: usize,
    pub seed: Option<u64>,
}

/// Load settings from `.env` and the environment
///
/// Variables named in `overridden` are not read; their setting keeps its
/// default and the caller supplies the real value.
pub fn load_settings(overridden: &[&str]) -> Result<Settings> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    settings_from(|key| std::env::var(key).ok(), overridden)
}

/// Build settings from a variable lookup; unset variables keep their defaults
pub fn settings_from(
    lookup: impl Fn(&str) -> Option<String>,
    overridden: &[&str],
) -> Result<Settings> {
    let lookup = |key: &str| {
        if overridden.iter().any(|name| *name == key) {
            None
        } else {
            lookup(key)
        }
    };

    let catalog_path = lookup(CATALOG_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG));

    let playlist_size = match lookup(PLAYLIST_SIZE_VAR) {
        Some(value) => {
            let size: i64 = value.trim().parse().map_err(|_| MixerError::InvalidSetting {
                key: PLAYLIST_SIZE_VAR.to_string(),
                value: value.clone(),
            })?;
            usize::try_from(size).map_err(|_| MixerError::NegativeTargetSize(size))?
        }
        None => DEFAULT_PLAYLIST_SIZE,
    };

    let seed = lookup(SEED_VAR)
        .map(|value| {
            value.trim().parse::<u64>().map_err(|_| MixerError::InvalidSetting {
                key: SEED_VAR.to_string(),
                value,
            })
        })
        .transpose()?;

    Ok(Settings {
        catalog_path,
        playlist_size,
        seed,
    })
}

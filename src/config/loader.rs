// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read and deserialize a config file without semantic validation.
///
/// Use [`load_and_validate`] unless you specifically want the raw model
/// (e.g. to build a [`ConfigFile`] through test builders).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// The entry point the rest of the application uses: read TOML, apply serde
/// defaults, then run the semantic checks in `validate.rs` (non-empty game
/// path and process name, value ranges, update-section consistency).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `Stagehand.toml` in the current working
/// directory. A function rather than a constant so a `STAGEHAND_CONFIG` env
/// var or multi-location discovery can slot in later.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Stagehand.toml")
}

// src/config/store.rs

//! The single configuration write path.
//!
//! Reads go through the in-memory [`ConfigFile`]; the only persisted write is
//! the game-path reconciliation performed on the launch fast path. It is a
//! best-effort, non-transactional overwrite: the orchestrator is
//! single-threaded, so no concurrent-writer protection is needed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::backend::ConfigStore;
use crate::errors::Result;

/// Rewrites the `[game].path` entry of the TOML config file in place,
/// preserving the rest of the document's values.
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigStore for TomlConfigStore {
    fn set_game_path(&self, game_path: &Path) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let mut doc: toml::Value = toml::from_str(&contents)?;

        let table = doc
            .as_table_mut()
            .context("config root is not a TOML table")?;

        let game = table
            .entry("game")
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
        let game_table = game
            .as_table_mut()
            .context("[game] section is not a TOML table")?;

        game_table.insert(
            "path".to_string(),
            toml::Value::String(game_path.to_string_lossy().into_owned()),
        );

        let serialized = toml::to_string(&doc)?;
        fs::write(&self.path, serialized)?;

        info!(path = %game_path.display(), "persisted reconciled game path");
        Ok(())
    }
}

// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! `Launch` and `Timeout` are the two failure kinds a launch attempt can
//! surface to the retry loop. Cleanup failures are always suppressed and
//! logged at the site where they occur, so they have no variant here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StagehandError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("launch failed: {0}")]
    Launch(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StagehandError {
    /// Shorthand for a launch failure with a message.
    pub fn launch(msg: impl Into<String>) -> Self {
        StagehandError::Launch(msg.into())
    }

    /// Shorthand for an expired bounded wait.
    pub fn timeout(msg: impl Into<String>) -> Self {
        StagehandError::Timeout(msg.into())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StagehandError>;

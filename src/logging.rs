// src/logging.rs

//! Logging initialisation.
//!
//! Level resolution order: the `--log-level` flag, then the `STAGEHAND_LOG`
//! environment variable (full `EnvFilter` directive syntax, so per-module
//! levels like `stagehand::session=debug` work), then `info`.
//!
//! Output goes to stderr; stdout stays free for hook commands and the
//! operator acknowledgment prompt.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Install the global subscriber. Call once, before any other work.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(directive(lvl)),
        None => {
            EnvFilter::try_from_env("STAGEHAND_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
        }
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

// src/backend/command.rs

//! Hook-command execution helpers.
//!
//! Hooks are shell one-liners from the `[hooks]` config section. They run
//! through the platform shell (`cmd /C` on Windows, `sh -c` elsewhere) and
//! answer probes with their exit status: 0 means "yes", anything else "no".
//!
//! These are synchronous one-shot invocations; the probes they implement are
//! single-pass by contract, and all waiting happens in the session core.

use std::process::{Command, Stdio};

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;

/// Build a platform shell command for the given hook line.
pub fn shell_command(line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(line);
        c
    }
}

/// Run a hook and report whether it exited successfully.
///
/// Failing to spawn the hook at all is an error; a non-zero exit status is a
/// normal "no" answer.
pub fn run_status(name: &str, line: &str) -> Result<bool> {
    let status = shell_command(line)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("spawning hook '{name}'"))?;

    debug!(hook = name, success = status.success(), "hook finished");
    Ok(status.success())
}

/// Run a hook and capture its stdout (trimmed).
///
/// Returns an error if the hook could not be spawned or exited non-zero.
pub fn run_capture(name: &str, line: &str) -> Result<String> {
    let output = shell_command(line)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("spawning hook '{name}'"))?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        return Err(anyhow::anyhow!("hook '{name}' exited with status {code}").into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(hook = name, stdout = %stdout, "hook captured output");
    Ok(stdout)
}

/// Run a hook to completion, logging the outcome. Never fails; used for
/// best-effort side effects (cleanup, notifications, audio).
pub fn run_best_effort(name: &str, line: &str) {
    match run_status(name, line) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(hook = name, "hook exited non-zero; continuing");
        }
        Err(e) => {
            tracing::warn!(hook = name, error = %e, "hook failed to run; continuing");
        }
    }
}

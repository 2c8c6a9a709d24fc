// src/backend/automation.rs

//! The externally-supplied automation pass.

use anyhow::Context;
use tracing::{info, warn};

use crate::backend::command::shell_command;
use crate::backend::AutomationPass;
use crate::errors::Result;

/// Runs the configured `automation` hook as the automation pass, blocking
/// until it exits. A missing hook is logged and treated as a successful
/// (empty) pass so the lifecycle can still be exercised end to end.
pub struct CommandAutomation {
    line: Option<String>,
}

impl CommandAutomation {
    pub fn new(line: Option<String>) -> Self {
        Self { line }
    }
}

impl AutomationPass for CommandAutomation {
    fn run(&self) -> Result<()> {
        let Some(line) = &self.line else {
            warn!("no automation hook configured; skipping automation pass");
            return Ok(());
        };

        info!(command = %line, "running automation pass");

        let status = shell_command(line)
            .status()
            .context("spawning automation pass")?;

        if status.success() {
            info!("automation pass finished");
            Ok(())
        } else {
            let code = status.code().unwrap_or(-1);
            Err(anyhow::anyhow!("automation pass exited with status {code}").into())
        }
    }
}

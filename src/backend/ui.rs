// src/backend/ui.rs

//! UI probe backend built on configured hooks.

use tracing::debug;

use crate::backend::command::{run_best_effort, run_status};
use crate::backend::UiProbe;
use crate::config::HooksSection;
use crate::errors::Result;

/// [`UiProbe`] implementation driving configured `[hooks]` commands.
///
/// Defaults when a hook is missing:
/// - `click_enter` reports `true` and `screen_check` reports `true` — an
///   install with no UI automation configured assumes the client needs no
///   clicking and is always detectable, so the waits pass immediately.
/// - The secondary click probes report `false` (nothing to click).
pub struct HookUiProbe {
    hooks: HooksSection,
}

impl HookUiProbe {
    pub fn new(hooks: HooksSection) -> Self {
        Self { hooks }
    }

    fn click_probe(&self, name: &str, line: &Option<String>, default: bool) -> Result<bool> {
        match line {
            Some(line) => run_status(name, line),
            None => {
                debug!(hook = name, default, "no hook configured; using default");
                Ok(default)
            }
        }
    }
}

impl UiProbe for HookUiProbe {
    fn click_enter(&self) -> Result<bool> {
        self.click_probe("click_enter", &self.hooks.click_enter, true)
    }

    fn click_confirm_restart(&self) -> Result<bool> {
        self.click_probe("click_confirm_restart", &self.hooks.click_confirm_restart, false)
    }

    fn click_network_retry(&self) -> Result<bool> {
        self.click_probe("click_network_retry", &self.hooks.click_network_retry, false)
    }

    fn click_start_alt_client(&self) -> Result<bool> {
        self.click_probe("click_start_alt_client", &self.hooks.click_start_alt_client, false)
    }

    fn screen_detectable(&self) -> Result<bool> {
        self.click_probe("screen_check", &self.hooks.screen_check, true)
    }

    fn release_resources(&self) {
        match &self.hooks.release_vision {
            Some(line) => run_best_effort("release_vision", line),
            None => debug!("no release_vision hook configured; nothing to release"),
        }
    }
}

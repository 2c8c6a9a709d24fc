// src/backend/power.rs

//! Resource tracker backend built on a configured hook.

use regex::Regex;

use crate::backend::command::run_capture;
use crate::backend::ResourceTracker;
use crate::config::HooksSection;
use crate::errors::Result;

/// [`ResourceTracker`] reading the current power from the `current_power`
/// hook's stdout. The first integer on the output is accepted, so hooks can
/// print e.g. `power: 183/240` and still parse.
pub struct HookResourceTracker {
    line: Option<String>,
    int_re: Regex,
}

impl HookResourceTracker {
    pub fn new(hooks: &HooksSection) -> Self {
        Self {
            line: hooks.current_power.clone(),
            int_re: Regex::new(r"\d+").expect("static regex"),
        }
    }
}

impl ResourceTracker for HookResourceTracker {
    fn current_power(&self) -> Result<u32> {
        let line = self.line.as_ref().ok_or_else(|| {
            anyhow::anyhow!("[hooks].current_power is required for loop mode but not configured")
        })?;

        let stdout = run_capture("current_power", line)?;

        let m = self
            .int_re
            .find(&stdout)
            .ok_or_else(|| anyhow::anyhow!("current_power hook printed no integer: {stdout:?}"))?;

        let value: u32 = m
            .as_str()
            .parse()
            .map_err(|e| anyhow::anyhow!("current_power value out of range: {e}"))?;

        Ok(value)
    }
}

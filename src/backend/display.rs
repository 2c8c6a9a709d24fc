// src/backend/display.rs

//! Display state backend built on configured hooks.

use tracing::{debug, warn};

use crate::backend::command::{run_best_effort, run_status};
use crate::backend::DisplayState;
use crate::config::HooksSection;
use crate::errors::Result;

/// [`DisplayState`] implementation driving configured `[hooks]` commands.
///
/// Missing hooks are no-ops: `set_*` succeed silently (logged at debug),
/// `validate_resolution` reports `true`. Hooks receive the resolution via
/// `{w}` / `{h}` placeholders in the command line.
pub struct HookDisplay {
    hooks: HooksSection,
}

impl HookDisplay {
    pub fn new(hooks: HooksSection) -> Self {
        Self { hooks }
    }
}

fn substitute(line: &str, width: u32, height: u32) -> String {
    line.replace("{w}", &width.to_string())
        .replace("{h}", &height.to_string())
}

impl DisplayState for HookDisplay {
    fn set_resolution(&self, width: u32, height: u32) -> Result<()> {
        match &self.hooks.set_resolution {
            Some(line) => {
                let line = substitute(line, width, height);
                if !run_status("set_resolution", &line)? {
                    return Err(
                        anyhow::anyhow!("set_resolution hook exited non-zero").into()
                    );
                }
                Ok(())
            }
            None => {
                debug!(width, height, "no set_resolution hook configured; skipping");
                Ok(())
            }
        }
    }

    fn restore_resolution(&self) {
        match &self.hooks.restore_resolution {
            Some(line) => run_best_effort("restore_resolution", line),
            None => debug!("no restore_resolution hook configured; skipping"),
        }
    }

    fn disable_hdr(&self) -> Result<()> {
        match &self.hooks.set_hdr {
            Some(line) => {
                if !run_status("set_hdr", line)? {
                    return Err(anyhow::anyhow!("set_hdr hook exited non-zero").into());
                }
                Ok(())
            }
            None => {
                debug!("no set_hdr hook configured; skipping");
                Ok(())
            }
        }
    }

    fn restore_hdr(&self) {
        match &self.hooks.restore_hdr {
            Some(line) => run_best_effort("restore_hdr", line),
            None => debug!("no restore_hdr hook configured; skipping"),
        }
    }

    fn validate_resolution(&self, width: u32, height: u32) -> bool {
        let Some(line) = &self.hooks.validate_resolution else {
            return true;
        };

        let line = substitute(line, width, height);
        match run_status("validate_resolution", &line) {
            Ok(ok) => ok,
            Err(e) => {
                warn!(error = %e, "validate_resolution hook failed; treating as mismatch");
                false
            }
        }
    }
}

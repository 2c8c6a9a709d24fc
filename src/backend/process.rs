// src/backend/process.rs

//! Process lifecycle backend built on OS commands.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::backend::command::{run_best_effort, run_capture, run_status, shell_command};
use crate::backend::ProcessLifecycle;
use crate::config::{GameSection, HooksSection};
use crate::errors::Result;
use crate::types::PowerAction;

/// Production [`ProcessLifecycle`] implementation.
///
/// - Focus: the `focus_check` hook when configured; otherwise falls back to
///   "is a process with the configured name running" via the platform's
///   process listing.
/// - Launch: the `launch` hook when configured; otherwise spawns
///   `[game].path` detached.
/// - Force-stop: the `force_stop` hook when configured; otherwise
///   `taskkill` / `pkill` on `[game].process_name`.
pub struct ShellProcessControl {
    game: GameSection,
    hooks: HooksSection,
}

impl ShellProcessControl {
    pub fn new(game: GameSection, hooks: HooksSection) -> Self {
        Self { game, hooks }
    }

    /// Fallback focus probe: the process list.
    ///
    /// Without a `focus_check` hook we can't see window focus, so a running
    /// process is treated as focused. Installs that care about real focus
    /// configure the hook.
    fn process_running(&self) -> Result<bool> {
        let name = &self.game.process_name;
        let line = if cfg!(windows) {
            format!("tasklist /FI \"IMAGENAME eq {name}\" | findstr /I \"{name}\"")
        } else {
            format!("pgrep -f '{name}'")
        };
        run_status("process_running", &line)
    }
}

impl ProcessLifecycle for ShellProcessControl {
    fn is_game_focused(&self) -> Result<bool> {
        match &self.hooks.focus_check {
            Some(line) => run_status("focus_check", line),
            None => self.process_running(),
        }
    }

    fn launch(&self) -> Result<bool> {
        if let Some(line) = &self.hooks.launch {
            return run_status("launch", line);
        }

        info!(path = %self.game.path, "launching game executable");

        // Detached spawn: the launcher usually re-execs the real client, so
        // we never hold on to the child handle.
        let spawned = Command::new(&self.game.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                debug!(pid = child.id(), "game process spawned");
                Ok(true)
            }
            Err(e) => {
                warn!(path = %self.game.path, error = %e, "failed to spawn game process");
                Ok(false)
            }
        }
    }

    fn force_stop(&self) {
        if let Some(line) = &self.hooks.force_stop {
            run_best_effort("force_stop", line);
            return;
        }

        let name = &self.game.process_name;
        let line = if cfg!(windows) {
            format!("taskkill /F /IM \"{name}\"")
        } else {
            format!("pkill -f '{name}'")
        };

        // pkill/taskkill exit non-zero when nothing matched, which is fine
        // here: "already stopped" is a successful stop.
        match shell_command(&line)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => {
                debug!(process = %name, success = status.success(), "force-stop finished");
            }
            Err(e) => {
                warn!(process = %name, error = %e, "force-stop command failed to run");
            }
        }
    }

    fn running_exe_path(&self) -> Option<PathBuf> {
        let line = self.hooks.running_exe.as_ref()?;
        match run_capture("running_exe", line) {
            Ok(out) if !out.is_empty() => Some(PathBuf::from(out)),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "running_exe hook failed; skipping path reconciliation");
                None
            }
        }
    }

    fn perform_power_action(&self, action: PowerAction) -> Result<()> {
        let line = if cfg!(windows) {
            match action {
                PowerAction::Shutdown => "shutdown /s /t 0",
                PowerAction::Hibernate => "shutdown /h",
                PowerAction::Sleep => "rundll32 powrprof.dll,SetSuspendState 0,1,0",
                PowerAction::Logoff => "shutdown /l",
            }
        } else {
            match action {
                PowerAction::Shutdown => "systemctl poweroff",
                PowerAction::Hibernate => "systemctl hibernate",
                PowerAction::Sleep => "systemctl suspend",
                PowerAction::Logoff => "loginctl terminate-user \"$USER\"",
            }
        };

        info!(?action, command = line, "performing system power action");

        if run_status("power_action", line)? {
            Ok(())
        } else {
            Err(anyhow::anyhow!("power action command exited non-zero: {line}").into())
        }
    }
}

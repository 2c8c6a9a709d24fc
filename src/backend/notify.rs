// src/backend/notify.rs

//! Notification backends. Fire-and-forget: failures are logged, never raised.

use std::process::Stdio;

use tracing::{info, warn};

use crate::backend::command::shell_command;
use crate::backend::Notifier;

/// Delivers notifications through the configured `notify` hook, with the
/// message appended as an extra shell argument (`"$1"` / `%1`).
pub struct CommandNotifier {
    line: String,
}

impl CommandNotifier {
    pub fn new(line: String) -> Self {
        Self { line }
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, message: &str) {
        // `sh -c 'cmd "$0"' message` / `cmd /C` with the message appended.
        let result = if cfg!(windows) {
            shell_command(&format!("{} \"{}\"", self.line, message.replace('"', "'")))
                .stdin(Stdio::null())
                .status()
        } else {
            std::process::Command::new("sh")
                .arg("-c")
                .arg(format!("{} \"$0\"", self.line))
                .arg(message)
                .stdin(Stdio::null())
                .status()
        };

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!(code = status.code(), "notify hook exited non-zero");
            }
            Err(e) => {
                warn!(error = %e, "notify hook failed to run");
            }
        }
    }
}

/// Fallback notifier used when no `notify` hook is configured: the message
/// just goes to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(notification = %message, "notification");
    }
}

// src/backend/mod.rs

//! Pluggable backend abstractions for everything outside the core.
//!
//! The session core (launch controller, orchestrator, scheduler) talks to the
//! external world exclusively through these traits. This makes it easy to swap
//! in fakes in tests while keeping the production hook-command implementations
//! in the sibling modules.
//!
//! Production implementations:
//! - [`ShellProcessControl`] — process launch/stop/power via OS commands.
//! - [`HookDisplay`] — resolution/HDR changes via configured hooks.
//! - [`HookUiProbe`] — single-pass UI probes via configured hooks.
//! - [`HookResourceTracker`] — current power via a configured hook.
//! - [`CommandNotifier`] / [`LogNotifier`] — notifications.
//! - [`CommandAudioCue`] — completion audio cue.
//! - [`CommandAutomation`] — the externally-supplied automation pass.
//!
//! All probes are single-pass and non-blocking; waiting is the core's
//! responsibility via `session::waiter`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::Result;
use crate::types::PowerAction;

pub mod audio;
pub mod automation;
pub mod command;
pub mod display;
pub mod notify;
pub mod power;
pub mod process;
pub mod ui;

pub use audio::{CommandAudioCue, NullAudioCue};
pub use automation::CommandAutomation;
pub use display::HookDisplay;
pub use notify::{CommandNotifier, LogNotifier};
pub use power::HookResourceTracker;
pub use process::ShellProcessControl;
pub use ui::HookUiProbe;

/// Lifecycle of the external game process.
///
/// The live process is the single source of truth for "is the game running";
/// implementations must query, never cache.
pub trait ProcessLifecycle: Send + Sync {
    /// Is the game window currently focused/active?
    fn is_game_focused(&self) -> Result<bool>;

    /// Start the game. Returns `false` if the process did not start.
    fn launch(&self) -> Result<bool>;

    /// Stop the game. Best-effort cleanup: must not fail; implementations
    /// log and swallow their own errors.
    fn force_stop(&self);

    /// Path of the actually running game executable, if it can be determined.
    fn running_exe_path(&self) -> Option<PathBuf>;

    /// Perform a system power action (shutdown, hibernate, ...).
    fn perform_power_action(&self, action: PowerAction) -> Result<()>;
}

/// Display resolution and HDR state around a launch attempt.
///
/// The `restore_*` methods are best-effort cleanup and must not fail.
pub trait DisplayState: Send + Sync {
    fn set_resolution(&self, width: u32, height: u32) -> Result<()>;
    fn restore_resolution(&self);
    fn disable_hdr(&self) -> Result<()>;
    fn restore_hdr(&self);

    /// Check the display is at the given resolution. Best-effort: a mismatch
    /// is reported as `false` but is never fatal to the caller.
    fn validate_resolution(&self, width: u32, height: u32) -> bool;
}

/// Single-pass UI probes, one per semantically distinct prompt.
///
/// Each click probe attempts at most one click and returns `true` only when
/// its control was found and clicked.
pub trait UiProbe: Send + Sync {
    /// The primary "enter" control on the title screen.
    fn click_enter(&self) -> Result<bool>;

    /// Confirm a hot-update restart prompt.
    fn click_confirm_restart(&self) -> Result<bool>;

    /// Dismiss a network-error prompt via its restart control.
    fn click_network_retry(&self) -> Result<bool>;

    /// "Start game" on alternate client variants.
    fn click_start_alt_client(&self) -> Result<bool>;

    /// Can the current screen be recognised at all?
    fn screen_detectable(&self) -> Result<bool>;

    /// Release any vision/OCR resources held by the probe implementation.
    /// Called before long reschedule sleeps to avoid idle memory retention.
    fn release_resources(&self);
}

/// Read access to the regenerating in-game resource.
pub trait ResourceTracker: Send + Sync {
    fn current_power(&self) -> Result<u32>;
}

/// Fire-and-forget notifications. Failures are logged, never raised.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Completion audio cue. Plays synchronously to conclusion; failures are
/// logged, never raised.
pub trait AudioCue: Send + Sync {
    fn play_to_completion(&self);
}

/// The externally-supplied automation pass run between `start()` and `stop()`.
pub trait AutomationPass: Send + Sync {
    fn run(&self) -> Result<()>;
}

/// Persisted-configuration writes. Reads go through the in-memory
/// [`crate::config::ConfigFile`]; this is the one write path.
pub trait ConfigStore: Send + Sync {
    fn set_game_path(&self, path: &Path) -> Result<()>;
}

/// Bundle of backend trait objects injected into the orchestrator.
///
/// Constructor injection (rather than a global process-controller singleton)
/// is what lets the integration tests drive the whole session with fakes.
#[derive(Clone)]
pub struct Backends {
    pub process: Arc<dyn ProcessLifecycle>,
    pub display: Arc<dyn DisplayState>,
    pub ui: Arc<dyn UiProbe>,
    pub power: Arc<dyn ResourceTracker>,
    pub notifier: Arc<dyn Notifier>,
    pub audio: Arc<dyn AudioCue>,
    pub automation: Arc<dyn AutomationPass>,
    pub config_store: Arc<dyn ConfigStore>,
}

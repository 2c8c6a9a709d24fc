// src/config/model.rs

use serde::Deserialize;

use crate::types::AfterFinishAction;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [game]
/// path = "C:/games/client/game.exe"
/// process_name = "game.exe"
/// auto_set_resolution = true
///
/// [run]
/// after_finish = "loop"
/// power_limit = 240
/// daily_reset_hour = 4
///
/// [hooks]
/// click_enter = "probe click enter"
/// screen_check = "probe screen"
/// ```
///
/// All sections are optional and have reasonable defaults, except that
/// `[game].path` and `[game].process_name` must be set for the launcher to
/// have anything to launch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// The external game client from `[game]`.
    #[serde(default)]
    pub game: GameSection,

    /// Post-run and reschedule behaviour from `[run]`.
    #[serde(default)]
    pub run: RunSection,

    /// Background update check from `[update]`.
    #[serde(default)]
    pub update: UpdateSection,

    /// External probe/side-effect commands from `[hooks]`.
    #[serde(default)]
    pub hooks: HooksSection,
}

/// Validated configuration.
///
/// Constructed only through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holders can rely on the invariants checked there (non-empty game path,
/// `power_limit >= 1`, `daily_reset_hour <= 23`, ...).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub game: GameSection,
    pub run: RunSection,
    pub update: UpdateSection,
    pub hooks: HooksSection,
}

impl ConfigFile {
    /// Construct without validation. Only `validate.rs` should call this.
    pub(crate) fn new_unchecked(
        game: GameSection,
        run: RunSection,
        update: UpdateSection,
        hooks: HooksSection,
    ) -> Self {
        Self {
            game,
            run,
            update,
            hooks,
        }
    }
}

/// `[game]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameSection {
    /// Path to the game executable.
    #[serde(default)]
    pub path: String,

    /// Process name used for force-stop and path reconciliation.
    #[serde(default)]
    pub process_name: String,

    /// Apply 1920x1080 and disable HDR before launching, restoring afterwards.
    #[serde(default)]
    pub auto_set_resolution: bool,

    /// On the fast path, reconcile `path` against the actually running
    /// process's executable and persist a corrected value.
    #[serde(default)]
    pub auto_set_game_path: bool,
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// What to do after the automation pass finishes.
    #[serde(default)]
    pub after_finish: AfterFinishAction,

    /// Play the completion audio cue before deciding what to do next.
    #[serde(default)]
    pub play_audio: bool,

    /// Resource cap the loop scheduler waits towards.
    #[serde(default = "default_power_limit")]
    pub power_limit: u32,

    /// Local hour (0-23) of the in-game daily reset.
    #[serde(default = "default_daily_reset_hour")]
    pub daily_reset_hour: u32,
}

fn default_power_limit() -> u32 {
    240
}

fn default_daily_reset_hour() -> u32 {
    4
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            after_finish: AfterFinishAction::default(),
            play_audio: false,
            power_limit: default_power_limit(),
            daily_reset_hour: default_daily_reset_hour(),
        }
    }
}

/// `[update]` section.
///
/// The check runs on an independent background task and only logs/notifies;
/// it never blocks the orchestrator.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    /// Whether to check for updates at startup.
    #[serde(default)]
    pub enabled: bool,

    /// Release JSON endpoint (GitHub API shape). Required when `enabled`.
    #[serde(default)]
    pub releases_url: Option<String>,

    /// Include prereleases (endpoint returns an array; first entry is used).
    #[serde(default)]
    pub include_prereleases: bool,

    /// HTTP timeout in seconds.
    #[serde(default = "default_update_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_update_timeout_secs() -> u64 {
    10
}

impl Default for UpdateSection {
    fn default() -> Self {
        Self {
            enabled: false,
            releases_url: None,
            include_prereleases: false,
            timeout_secs: default_update_timeout_secs(),
        }
    }
}

/// `[hooks]` section.
///
/// Each entry is a shell command (run via `cmd /C` on Windows, `sh -c`
/// elsewhere). Probes answer with their exit status: 0 means "yes" (found /
/// clicked / detectable), non-zero means "no". Missing hooks fall back to the
/// defaults documented on each backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HooksSection {
    /// Is the game window focused/active? Exit 0 = yes.
    #[serde(default)]
    pub focus_check: Option<String>,

    /// Override for launching the game. Defaults to spawning `[game].path`.
    #[serde(default)]
    pub launch: Option<String>,

    /// Override for force-stopping the game. Defaults to killing
    /// `[game].process_name`.
    #[serde(default)]
    pub force_stop: Option<String>,

    /// Print the running game executable's path on stdout.
    #[serde(default)]
    pub running_exe: Option<String>,

    /// Find and click the primary "enter" control. Exit 0 = clicked.
    #[serde(default)]
    pub click_enter: Option<String>,

    /// Confirm a hot-update restart prompt.
    #[serde(default)]
    pub click_confirm_restart: Option<String>,

    /// Dismiss a network-error prompt by clicking its restart control.
    #[serde(default)]
    pub click_network_retry: Option<String>,

    /// Click "start game" on alternate client variants.
    #[serde(default)]
    pub click_start_alt_client: Option<String>,

    /// Is the current screen recognisable? Exit 0 = yes.
    #[serde(default)]
    pub screen_check: Option<String>,

    /// Tear down any vision/OCR resources held by the probe hooks.
    #[serde(default)]
    pub release_vision: Option<String>,

    /// Print the current in-game power as an integer on stdout.
    #[serde(default)]
    pub current_power: Option<String>,

    /// Set the display to the given resolution ("{w}" / "{h}" placeholders).
    #[serde(default)]
    pub set_resolution: Option<String>,

    /// Restore the display resolution captured by `set_resolution`.
    #[serde(default)]
    pub restore_resolution: Option<String>,

    /// Disable auto-HDR for the launch.
    #[serde(default)]
    pub set_hdr: Option<String>,

    /// Restore the HDR mode captured by `set_hdr`.
    #[serde(default)]
    pub restore_hdr: Option<String>,

    /// Check the display is at the given resolution (best-effort).
    #[serde(default)]
    pub validate_resolution: Option<String>,

    /// Deliver a notification; the message is appended as an argument.
    #[serde(default)]
    pub notify: Option<String>,

    /// Play the completion audio cue to conclusion.
    #[serde(default)]
    pub audio: Option<String>,

    /// The automation pass to run once the game is ready.
    #[serde(default)]
    pub automation: Option<String>,
}

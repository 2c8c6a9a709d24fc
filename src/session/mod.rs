// src/session/mod.rs

//! Session lifecycle core.
//!
//! This module ties together:
//! - the generic condition waiter (`waiter`)
//! - the scoped display guard (`guard`)
//! - the launch retry state machine (`launch`)
//! - the top-level orchestrator (`orchestrator`)
//!
//! The core is logically single-threaded: `start()`, `stop()`, the retry loop
//! and the reschedule decision run sequentially; the only suspension points
//! are the injected clock's sleeps.

use std::time::Duration;

use crate::errors::StagehandError;

pub mod clock;
pub mod guard;
pub mod launch;
pub mod orchestrator;
pub mod waiter;

pub use clock::{Clock, TokioClock};
pub use guard::ResolutionGuard;
pub use launch::LaunchRetryController;
pub use orchestrator::{SessionOrchestrator, StopAction};
pub use waiter::{wait_until, WaitSpec};

/// Maximum number of launch attempts per `ensure_ready()` call.
pub const MAX_RETRY: u32 = 3;

/// Fixed sleep after a state transition, letting the external UI stabilise
/// before the next probe.
pub(crate) const SETTLE_DELAY: Duration = Duration::from_secs(10);

/// Short settle used on the fast path (the game is already up).
pub(crate) const FAST_PATH_SETTLE: Duration = Duration::from_secs(1);

/// How long to wait for the game window to become focused after launch.
pub(crate) const SWITCH_TIMEOUT: Duration = Duration::from_secs(60);

/// How long to keep probing for the launch-time prompts / "enter" control.
pub(crate) const ENTER_PROMPT_TIMEOUT: Duration = Duration::from_secs(600);

/// How long to wait for the post-launch screen to become recognisable.
pub(crate) const SCREEN_DETECT_TIMEOUT: Duration = Duration::from_secs(180);

/// Resolution applied before launch when `auto_set_resolution` is enabled.
pub(crate) const TARGET_WIDTH: u32 = 1920;
pub(crate) const TARGET_HEIGHT: u32 = 1080;

/// Lifecycle state of the automation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Launching,
    AwaitingWindow,
    AwaitingEnterPrompt,
    Ready,
    Failed,
}

/// Lifecycle state owned by the orchestrator and mutated only by the launch
/// controller during an attempt.
///
/// Invariant: `retry_count` never exceeds [`MAX_RETRY`]; `Failed` after the
/// final retry is terminal for that `start()` call and is always propagated
/// to the caller.
#[derive(Debug)]
pub struct GameSession {
    pub state: SessionState,
    pub retry_count: u32,
    pub last_error: Option<String>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Stopped,
            retry_count: 0,
            last_error: None,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one pass through the retry loop.
///
/// The loop inspects this variant instead of relying on stack unwinding for
/// control flow; `Exhausted` is the only case that surfaces to the caller.
#[derive(Debug)]
pub enum AttemptOutcome {
    Ready,
    Retryable(StagehandError),
    Exhausted(StagehandError),
}

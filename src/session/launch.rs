// src/session/launch.rs

//! Launch retry state machine.
//!
//! Drives the external game client from "not running" to "automation-ready":
//!
//! 1. Fast path: if the game window is already focused, skip launch and
//!    display changes entirely and only validate the final screen.
//! 2. Full path: apply display state (scoped), launch, wait for the window
//!    switch, restore display state, click through the launch-time prompts,
//!    then wait for the screen to become recognisable.
//!
//! Any failure inside an attempt is caught at the attempt boundary, the game
//! is force-stopped (best-effort), and the loop either retries or surfaces
//! the original error after the final attempt.

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::backend::{ConfigStore, DisplayState, ProcessLifecycle, UiProbe};
use crate::config::GameSection;
use crate::errors::{Result, StagehandError};
use crate::session::clock::Clock;
use crate::session::guard::ResolutionGuard;
use crate::session::waiter::{wait_until, WaitSpec};
use crate::session::{
    AttemptOutcome, GameSession, SessionState, ENTER_PROMPT_TIMEOUT, FAST_PATH_SETTLE, MAX_RETRY,
    SCREEN_DETECT_TIMEOUT, SETTLE_DELAY, SWITCH_TIMEOUT, TARGET_HEIGHT, TARGET_WIDTH,
};

/// One `ensure_ready()` worth of retry state. Collaborators are borrowed so
/// the orchestrator keeps ownership; the session is mutated in place.
pub struct LaunchRetryController<'a> {
    process: &'a dyn ProcessLifecycle,
    display: &'a dyn DisplayState,
    ui: &'a dyn UiProbe,
    config_store: &'a dyn ConfigStore,
    clock: &'a dyn Clock,
    game: &'a GameSection,
    session: &'a mut GameSession,
}

impl<'a> LaunchRetryController<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        process: &'a dyn ProcessLifecycle,
        display: &'a dyn DisplayState,
        ui: &'a dyn UiProbe,
        config_store: &'a dyn ConfigStore,
        clock: &'a dyn Clock,
        game: &'a GameSection,
        session: &'a mut GameSession,
    ) -> Self {
        Self {
            process,
            display,
            ui,
            config_store,
            clock,
            game,
            session,
        }
    }

    /// Bring the game to the automation-ready state, retrying up to
    /// [`MAX_RETRY`] times. The last underlying cause is returned verbatim
    /// when all attempts are exhausted.
    pub async fn ensure_ready(&mut self) -> Result<()> {
        self.session.state = SessionState::Stopped;
        self.session.retry_count = 0;
        self.session.last_error = None;

        let mut attempt = 0;
        loop {
            attempt += 1;

            let outcome = match self.run_attempt(attempt).await {
                Ok(()) => AttemptOutcome::Ready,
                Err(e) if attempt < MAX_RETRY => AttemptOutcome::Retryable(e),
                Err(e) => AttemptOutcome::Exhausted(e),
            };

            match outcome {
                AttemptOutcome::Ready => {
                    self.session.state = SessionState::Ready;
                    info!(attempt, "game is ready for automation");
                    return Ok(());
                }
                AttemptOutcome::Retryable(e) => {
                    warn!(
                        attempt,
                        max = MAX_RETRY,
                        error = %e,
                        "launch attempt failed; stopping game before retry"
                    );
                    self.fail_attempt(attempt, &e);
                }
                AttemptOutcome::Exhausted(e) => {
                    error!(
                        attempt,
                        max = MAX_RETRY,
                        error = %e,
                        "final launch attempt failed"
                    );
                    self.fail_attempt(attempt, &e);
                    self.session.state = SessionState::Failed;
                    return Err(e);
                }
            }
        }
    }

    /// Shared bookkeeping for a failed attempt: force-stop the game (cleanup
    /// that itself never fails) and record the failure on the session.
    fn fail_attempt(&mut self, attempt: u32, error: &StagehandError) {
        self.process.force_stop();
        self.session.retry_count = attempt;
        self.session.last_error = Some(error.to_string());
    }

    /// One full pass of the launch state machine.
    async fn run_attempt(&mut self, attempt: u32) -> Result<()> {
        info!(attempt, max = MAX_RETRY, "starting launch attempt");

        if self.process.is_game_focused()? {
            debug!("game already focused; taking fast path");
            self.fast_path().await?;
        } else {
            self.full_launch().await?;
        }

        // Both paths end the same way: the current screen must become
        // recognisable before the game counts as ready.
        let ui = self.ui;
        let detected = wait_until(self.clock, WaitSpec::new(SCREEN_DETECT_TIMEOUT), || {
            ui.screen_detectable()
        })
        .await?;

        if !detected {
            return Err(StagehandError::timeout(
                "post-launch screen detection timed out",
            ));
        }

        Ok(())
    }

    /// The game is already running: no launch, no display changes. Only a
    /// non-mutating resolution check, optional path reconciliation, and a
    /// short settle.
    async fn fast_path(&mut self) -> Result<()> {
        if !self.display.validate_resolution(TARGET_WIDTH, TARGET_HEIGHT) {
            warn!(
                width = TARGET_WIDTH,
                height = TARGET_HEIGHT,
                "running game is not at the expected resolution; continuing"
            );
        }

        if self.game.auto_set_game_path {
            self.reconcile_game_path();
        }

        self.clock.sleep(FAST_PATH_SETTLE).await;
        Ok(())
    }

    /// Reconcile the configured game path against the actually running
    /// process's executable. Best-effort enrichment: failures are logged and
    /// never affect the state machine.
    fn reconcile_game_path(&self) {
        let Some(running) = self.process.running_exe_path() else {
            debug!("running executable path unavailable; skipping reconciliation");
            return;
        };

        if running == Path::new(&self.game.path) {
            return;
        }

        match self.config_store.set_game_path(&running) {
            Ok(()) => {
                info!(path = %running.display(), "game path updated from running process");
            }
            Err(e) => {
                warn!(error = %e, "failed to persist reconciled game path; continuing");
            }
        }
    }

    /// Launch from scratch and drive the UI to the point where the final
    /// screen wait can take over.
    async fn full_launch(&mut self) -> Result<()> {
        self.session.state = SessionState::Launching;

        // Scoped acquisition: if anything below fails, the guard's drop
        // restores resolution and HDR before the attempt boundary closes.
        let mut guard = if self.game.auto_set_resolution {
            Some(ResolutionGuard::apply(
                self.display,
                TARGET_WIDTH,
                TARGET_HEIGHT,
            )?)
        } else {
            None
        };

        if !self.process.launch()? {
            return Err(StagehandError::launch("process did not start"));
        }

        self.clock.sleep(SETTLE_DELAY).await;
        self.session.state = SessionState::AwaitingWindow;

        let process = self.process;
        let switched = wait_until(self.clock, WaitSpec::new(SWITCH_TIMEOUT), || {
            process.is_game_focused()
        })
        .await?;

        if !switched {
            if let Some(g) = guard.as_mut() {
                g.restore();
            }
            return Err(StagehandError::timeout("switch to game timed out"));
        }

        self.clock.sleep(SETTLE_DELAY).await;

        if let Some(g) = guard.as_mut() {
            g.restore();
        }

        // Re-validate after the restore; a mismatch is logged, never fatal.
        if !self.display.validate_resolution(TARGET_WIDTH, TARGET_HEIGHT) {
            warn!(
                width = TARGET_WIDTH,
                height = TARGET_HEIGHT,
                "resolution check failed after launch; continuing"
            );
        }

        self.session.state = SessionState::AwaitingEnterPrompt;

        let ui = self.ui;
        let entered = wait_until(self.clock, WaitSpec::new(ENTER_PROMPT_TIMEOUT), || {
            check_and_click_enter(ui)
        })
        .await?;

        if !entered {
            return Err(StagehandError::timeout("enter prompt not found"));
        }

        self.clock.sleep(SETTLE_DELAY).await;
        Ok(())
    }
}

/// Single probe pass over the launch-time prompts.
///
/// The primary "enter" control wins immediately. Only when it is absent do we
/// try the secondary prompts that can be blocking it: a hot-update restart
/// confirmation, a network-error restart, and the alternate-client "start
/// game" button. Each probe attempts at most one click.
fn check_and_click_enter(ui: &dyn UiProbe) -> Result<bool> {
    if ui.click_enter()? {
        return Ok(true);
    }

    ui.click_confirm_restart()?;
    ui.click_network_retry()?;
    ui.click_start_alt_client()?;

    Ok(false)
}

// src/session/orchestrator.rs

//! Top-level session sequencing.
//!
//! `start()` brings the game to the ready state and runs the automation pass;
//! `stop()` applies the configured post-run behaviour and returns a
//! [`StopAction`] for the outer shell to execute. The orchestrator itself
//! never exits the process or reads stdin, which keeps it fully drivable from
//! tests.
//!
//! Not reentrant: callers must serialize `start()`/`stop()` invocations.

use std::sync::Arc;

use tracing::{error, info};

use crate::backend::Backends;
use crate::config::ConfigFile;
use crate::errors::Result;
use crate::sched::{compute_next_run, ResourceSnapshot};
use crate::session::clock::Clock;
use crate::session::launch::LaunchRetryController;
use crate::session::{GameSession, SessionState};
use crate::types::AfterFinishAction;

/// What the outer shell should do after `stop()` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAction {
    /// Power is already at the limit; call `start()` again immediately.
    RunAgainNow,
    /// The reschedule sleep has completed; call `start()` again.
    RunAfterWait,
    /// Terminate the program. `pause_for_ack` asks the shell to wait for
    /// operator acknowledgment first (moot after a system power action).
    Exit { pause_for_ack: bool },
}

pub struct SessionOrchestrator {
    config: ConfigFile,
    backends: Backends,
    clock: Arc<dyn Clock>,
    session: GameSession,
}

impl SessionOrchestrator {
    pub fn new(config: ConfigFile, backends: Backends, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            backends,
            clock,
            session: GameSession::new(),
        }
    }

    /// Read-only view of the session state (for the shell and tests).
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Bring the game to the ready state and run the automation pass.
    ///
    /// A launch failure after the controller's own retry budget is fatal for
    /// this invocation: it is logged and propagated, never swallowed.
    pub async fn start(&mut self) -> Result<()> {
        info!("session starting");

        let mut controller = LaunchRetryController::new(
            &*self.backends.process,
            &*self.backends.display,
            &*self.backends.ui,
            &*self.backends.config_store,
            &*self.clock,
            &self.config.game,
            &mut self.session,
        );

        if let Err(e) = controller.ensure_ready().await {
            error!(error = %e, "could not bring the game to a ready state");
            return Err(e);
        }

        self.backends.automation.run()?;

        info!("session pass complete");
        Ok(())
    }

    /// Apply the configured post-run behaviour.
    ///
    /// `loop_requested` is the shell's intent (e.g. false for `--once`); loop
    /// mode additionally requires `after_finish = "loop"` in the config.
    pub async fn stop(&mut self, loop_requested: bool) -> Result<StopAction> {
        info!("session stopping");

        // Audio is best-effort and never load-bearing; the cue implementation
        // logs and swallows its own failures.
        if self.config.run.play_audio {
            self.backends.audio.play_to_completion();
        }

        if loop_requested && self.config.run.after_finish == AfterFinishAction::Loop {
            return self.reschedule().await;
        }

        if let Some(action) = self.config.run.after_finish.power_action() {
            self.backends.process.perform_power_action(action)?;
            return Ok(StopAction::Exit {
                pause_for_ack: false,
            });
        }

        Ok(StopAction::Exit { pause_for_ack: true })
    }

    /// Loop branch: either signal an immediate re-run (power already capped)
    /// or stop the game, compute the next run time, notify, release probe
    /// resources, and sleep until it is time.
    async fn reschedule(&mut self) -> Result<StopAction> {
        let limit = self.config.run.power_limit;
        let current = self.backends.power.current_power()?;

        if current >= limit {
            info!(current, limit, "power at or above the limit; running again now");
            return Ok(StopAction::RunAgainNow);
        }

        self.backends.process.force_stop();
        self.session.state = SessionState::Stopped;

        let snapshot = ResourceSnapshot {
            current_power: current,
            power_limit: limit,
        };
        let decision = compute_next_run(
            snapshot,
            self.clock.local_now(),
            self.config.run.daily_reset_hour,
            &mut rand::thread_rng(),
        );

        let resume_at = decision.resume_at.format("%Y-%m-%d %H:%M:%S").to_string();
        info!(
            current,
            limit,
            wait_secs = decision.wait.as_secs(),
            resume_at = %resume_at,
            "next run scheduled"
        );
        self.backends
            .notifier
            .notify(&format!("Next run scheduled for {resume_at}"));

        // Long sleep ahead: drop the vision/OCR resources so they don't sit
        // in memory while nothing is being probed.
        self.backends.ui.release_resources();

        self.clock.sleep(decision.wait).await;

        Ok(StopAction::RunAfterWait)
    }
}

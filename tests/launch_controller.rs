// tests/launch_controller.rs

//! Launch retry state machine scenarios driven entirely by fakes: no real
//! processes, no real time.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use stagehand::config::GameSection;
use stagehand::errors::StagehandError;
use stagehand::session::{GameSession, LaunchRetryController, SessionState, MAX_RETRY};
use stagehand_test_utils::fakes::{
    FakeClock, FakeConfigStore, FakeDisplay, FakeProcess, FakeUiProbe,
};
use stagehand_test_utils::{init_tracing, within};

type TestResult = Result<(), Box<dyn Error>>;

fn game_section() -> GameSection {
    GameSection {
        path: "/games/client/game".to_string(),
        process_name: "game".to_string(),
        auto_set_resolution: false,
        auto_set_game_path: false,
    }
}

struct Harness {
    process: FakeProcess,
    display: FakeDisplay,
    ui: FakeUiProbe,
    store: FakeConfigStore,
    clock: FakeClock,
    game: GameSection,
    session: GameSession,
}

impl Harness {
    fn new(game: GameSection) -> Self {
        Self {
            process: FakeProcess::new(),
            display: FakeDisplay::new(),
            ui: FakeUiProbe::new(),
            store: FakeConfigStore::new(),
            clock: FakeClock::new(),
            game,
            session: GameSession::new(),
        }
    }

    async fn ensure_ready(&mut self) -> stagehand::errors::Result<()> {
        let mut controller = LaunchRetryController::new(
            &self.process,
            &self.display,
            &self.ui,
            &self.store,
            &self.clock,
            &self.game,
            &mut self.session,
        );
        controller.ensure_ready().await
    }
}

#[tokio::test]
async fn fast_path_skips_launch_and_display_changes() -> TestResult {
    init_tracing();

    let mut h = Harness::new(game_section());
    h.process.script_focus([true]);

    h.ensure_ready().await?;

    assert_eq!(h.session.state, SessionState::Ready);
    assert_eq!(h.session.retry_count, 0);
    assert_eq!(h.process.launch_calls(), 0);
    assert_eq!(h.display.set_resolution_calls(), 0);
    assert_eq!(h.display.restore_resolution_calls(), 0);
    assert!(h.store.saved_paths().is_empty());
    Ok(())
}

#[tokio::test]
async fn fast_path_reconciles_game_path_when_enabled() -> TestResult {
    init_tracing();

    let mut game = game_section();
    game.auto_set_game_path = true;

    let mut h = Harness::new(game);
    h.process.script_focus([true]);
    *h.process.running_exe.lock().unwrap() = Some(PathBuf::from("/opt/actual/game"));

    h.ensure_ready().await?;

    assert_eq!(h.store.saved_paths(), vec![PathBuf::from("/opt/actual/game")]);
    Ok(())
}

#[tokio::test]
async fn fast_path_skips_reconciliation_when_paths_match() -> TestResult {
    init_tracing();

    let mut game = game_section();
    game.auto_set_game_path = true;

    let mut h = Harness::new(game);
    h.process.script_focus([true]);
    *h.process.running_exe.lock().unwrap() = Some(PathBuf::from("/games/client/game"));

    h.ensure_ready().await?;

    assert!(h.store.saved_paths().is_empty());
    Ok(())
}

#[tokio::test]
async fn launch_failure_exhausts_all_retries() -> TestResult {
    init_tracing();

    let mut h = Harness::new(game_section());
    h.process.script_launch([false, false, false]);

    let err = h.ensure_ready().await.expect_err("all attempts must fail");

    assert!(matches!(err, StagehandError::Launch(_)));
    assert_eq!(h.process.launch_calls(), MAX_RETRY);
    assert_eq!(h.process.force_stop_calls(), MAX_RETRY);
    assert_eq!(h.session.state, SessionState::Failed);
    assert_eq!(h.session.retry_count, MAX_RETRY);
    assert!(h.session.last_error.is_some());
    Ok(())
}

#[tokio::test]
async fn failed_attempt_retries_and_then_succeeds() -> TestResult {
    init_tracing();

    let mut h = Harness::new(game_section());
    // Attempt 1: not focused, launch reports failure.
    // Attempt 2: not focused, launch ok, focused on the first poll.
    h.process.script_focus([false, false, true]);
    h.process.script_launch([false, true]);

    h.ensure_ready().await?;

    assert_eq!(h.session.state, SessionState::Ready);
    assert_eq!(h.session.retry_count, 1);
    assert_eq!(h.process.launch_calls(), 2);
    assert_eq!(h.process.force_stop_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn display_state_restored_once_per_attempt_on_switch_timeout() -> TestResult {
    init_tracing();

    let mut game = game_section();
    game.auto_set_resolution = true;

    let mut h = Harness::new(game);
    // Focus stays false forever (empty script defaults to false): every
    // attempt launches, then times out waiting for the window switch.
    let err = h.ensure_ready().await.expect_err("switch wait must time out");

    assert!(matches!(err, StagehandError::Timeout(_)));
    assert_eq!(h.display.set_resolution_calls(), MAX_RETRY);
    assert_eq!(h.display.restore_resolution_calls(), MAX_RETRY);
    assert_eq!(h.display.restore_hdr_calls(), MAX_RETRY);
    Ok(())
}

#[tokio::test]
async fn display_state_restored_once_on_successful_launch() -> TestResult {
    init_tracing();

    let mut game = game_section();
    game.auto_set_resolution = true;

    let mut h = Harness::new(game);
    h.process.script_focus([false, true]);

    h.ensure_ready().await?;

    assert_eq!(h.session.state, SessionState::Ready);
    assert_eq!(h.display.set_resolution_calls(), 1);
    assert_eq!(h.display.restore_resolution_calls(), 1);
    assert_eq!(h.display.restore_hdr_calls(), 1);
    // Full path: three 10-second settles, all other waits succeed on their
    // first poll.
    assert_eq!(
        h.clock.sleeps(),
        vec![
            Duration::from_secs(10),
            Duration::from_secs(10),
            Duration::from_secs(10),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn enter_prompt_probe_tries_secondary_prompts_only_when_enter_absent() -> TestResult {
    init_tracing();

    let mut h = Harness::new(game_section());
    h.process.script_focus([false, true]);
    // Enter lands on the third probe pass.
    h.ui.script_enter([false, false, true]);

    h.ensure_ready().await?;

    assert_eq!(*h.ui.enter_calls.lock().unwrap(), 3);
    // Secondary prompts probed on the two passes where enter was absent.
    assert_eq!(*h.ui.confirm_restart_calls.lock().unwrap(), 2);
    assert_eq!(*h.ui.network_retry_calls.lock().unwrap(), 2);
    assert_eq!(*h.ui.start_alt_calls.lock().unwrap(), 2);
    Ok(())
}

#[tokio::test]
async fn screen_detection_timeout_fails_the_attempt() -> TestResult {
    init_tracing();

    let mut h = Harness::new(game_section());
    // Fast path every attempt, but the screen never becomes recognisable.
    h.process.script_focus([true, true, true]);
    // 181 false answers per attempt cover the 180s wait at 1s polls.
    h.ui.script_screen(std::iter::repeat(false).take(200 * 3));

    let err = within(5, h.ensure_ready())
        .await
        .expect_err("screen wait must time out");

    assert!(matches!(err, StagehandError::Timeout(_)));
    assert_eq!(h.session.state, SessionState::Failed);
    assert_eq!(h.process.force_stop_calls(), MAX_RETRY);
    Ok(())
}

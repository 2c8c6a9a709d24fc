// tests/orchestrator_behaviour.rs

//! End-to-end orchestrator sequencing with fake backends.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use stagehand::backend::Backends;
use stagehand::session::{SessionOrchestrator, StopAction};
use stagehand::types::{AfterFinishAction, PowerAction};
use stagehand_test_utils::builders::ConfigFileBuilder;
use stagehand_test_utils::fakes::{
    FakeAudio, FakeAutomation, FakeClock, FakeConfigStore, FakeDisplay, FakeNotifier, FakePower,
    FakeProcess, FakeUiProbe,
};
use stagehand_test_utils::{init_tracing, within};

type TestResult = Result<(), Box<dyn Error>>;

/// All fakes plus the orchestrator wired to them.
struct Harness {
    process: Arc<FakeProcess>,
    ui: Arc<FakeUiProbe>,
    power: Arc<FakePower>,
    notifier: Arc<FakeNotifier>,
    audio: Arc<FakeAudio>,
    automation: Arc<FakeAutomation>,
    clock: Arc<FakeClock>,
    orchestrator: SessionOrchestrator,
}

fn harness(config: stagehand::config::ConfigFile, current_power: u32) -> Harness {
    let process = Arc::new(FakeProcess::new());
    let display = Arc::new(FakeDisplay::new());
    let ui = Arc::new(FakeUiProbe::new());
    let power = Arc::new(FakePower::new(current_power));
    let notifier = Arc::new(FakeNotifier::new());
    let audio = Arc::new(FakeAudio::new());
    let automation = Arc::new(FakeAutomation::new());
    let store = Arc::new(FakeConfigStore::new());
    let clock = Arc::new(FakeClock::new());

    let backends = Backends {
        process: process.clone(),
        display,
        ui: ui.clone(),
        power: power.clone(),
        notifier: notifier.clone(),
        audio: audio.clone(),
        automation: automation.clone(),
        config_store: store,
    };

    let orchestrator = SessionOrchestrator::new(config, backends, clock.clone());

    Harness {
        process,
        ui,
        power,
        notifier,
        audio,
        automation,
        clock,
        orchestrator,
    }
}

#[tokio::test]
async fn start_runs_automation_after_game_is_ready() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new().build();
    let mut h = harness(cfg, 0);
    h.process.script_focus([true]);

    h.orchestrator.start().await?;

    assert_eq!(h.automation.runs(), 1);
    Ok(())
}

#[tokio::test]
async fn power_at_limit_signals_immediate_rerun_without_scheduling() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .after_finish(AfterFinishAction::Loop)
        .power_limit(240)
        .build();
    let mut h = harness(cfg, 240);

    let action = h.orchestrator.stop(true).await?;

    assert_eq!(action, StopAction::RunAgainNow);
    assert_eq!(h.power.reads(), 1);
    // No reschedule happened: no notification, no sleep, no teardown, and
    // the game keeps running.
    assert!(h.notifier.messages().is_empty());
    assert!(h.clock.sleeps().is_empty());
    assert_eq!(h.ui.release_calls(), 0);
    assert_eq!(h.process.force_stop_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn below_limit_reschedules_notifies_and_sleeps() -> TestResult {
    init_tracing();

    // FakeClock starts at 2026-01-05 12:00:00; the next 04:00 reset is 16
    // hours out, so the resource-cap branch (40 * 360 = 14400 s) wins and
    // jitter cannot affect the wait.
    let cfg = ConfigFileBuilder::new()
        .after_finish(AfterFinishAction::Loop)
        .power_limit(240)
        .daily_reset_hour(4)
        .build();
    let mut h = harness(cfg, 200);

    let action = within(5, h.orchestrator.stop(true)).await?;

    assert_eq!(action, StopAction::RunAfterWait);
    assert_eq!(h.process.force_stop_calls(), 1);
    assert_eq!(h.ui.release_calls(), 1);
    assert_eq!(h.clock.sleeps(), vec![Duration::from_secs(14400)]);

    // 12:00:00 + 14400 s = 16:00:00 the same day.
    let messages = h.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0].contains("2026-01-05 16:00:00"),
        "unexpected notification: {}",
        messages[0]
    );
    Ok(())
}

#[tokio::test]
async fn loop_config_without_loop_request_exits_with_acknowledgment() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .after_finish(AfterFinishAction::Loop)
        .build();
    let mut h = harness(cfg, 0);

    let action = h.orchestrator.stop(false).await?;

    assert_eq!(
        action,
        StopAction::Exit {
            pause_for_ack: true
        }
    );
    assert_eq!(h.power.reads(), 0);
    Ok(())
}

#[tokio::test]
async fn shutdown_action_performs_power_action_and_skips_acknowledgment() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .after_finish(AfterFinishAction::Shutdown)
        .build();
    let mut h = harness(cfg, 0);

    let action = h.orchestrator.stop(true).await?;

    assert_eq!(
        action,
        StopAction::Exit {
            pause_for_ack: false
        }
    );
    assert_eq!(h.process.power_actions(), vec![PowerAction::Shutdown]);
    Ok(())
}

#[tokio::test]
async fn completion_cue_plays_when_configured() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new().play_audio(true).build();
    let mut h = harness(cfg, 0);

    let action = h.orchestrator.stop(true).await?;

    assert_eq!(h.audio.plays(), 1);
    assert_eq!(
        action,
        StopAction::Exit {
            pause_for_ack: true
        }
    );
    Ok(())
}

// tests/waiter_behaviour.rs

use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use stagehand::session::{wait_until, WaitSpec};
use stagehand_test_utils::fakes::FakeClock;
use stagehand_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn zero_timeout_evaluates_probe_exactly_once() -> TestResult {
    init_tracing();

    let clock = FakeClock::new();
    let calls = AtomicU32::new(0);

    let result = wait_until(&clock, WaitSpec::new(Duration::ZERO), || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    })
    .await?;

    assert!(!result);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(clock.sleeps().is_empty());
    Ok(())
}

#[tokio::test]
async fn returns_true_on_first_true_evaluation_without_extra_polls() -> TestResult {
    init_tracing();

    let clock = FakeClock::new();
    let calls = AtomicU32::new(0);

    let result = wait_until(&clock, WaitSpec::new(Duration::from_secs(30)), || {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(n == 3)
    })
    .await?;

    assert!(result);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // Two false evaluations, two poll sleeps, then the success.
    assert_eq!(clock.sleeps().len(), 2);
    Ok(())
}

#[tokio::test]
async fn times_out_when_probe_never_turns_true() -> TestResult {
    init_tracing();

    let clock = FakeClock::new();
    let calls = AtomicU32::new(0);

    let spec = WaitSpec::new(Duration::from_secs(5)).with_poll_period(Duration::from_secs(1));
    let result = wait_until(&clock, spec, || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    })
    .await?;

    assert!(!result);
    // Five 1-second polls fit inside the 5-second budget, plus the final
    // evaluation at the boundary.
    assert_eq!(calls.load(Ordering::SeqCst), 6);
    assert_eq!(clock.sleeps().len(), 5);
    Ok(())
}

#[tokio::test]
async fn probe_errors_propagate_to_the_caller() {
    init_tracing();

    let clock = FakeClock::new();

    let result = wait_until(&clock, WaitSpec::new(Duration::from_secs(5)), || {
        Err(anyhow::anyhow!("probe exploded").into())
    })
    .await;

    assert!(result.is_err());
}

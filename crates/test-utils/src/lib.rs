// crates/test-utils/src/lib.rs

//! Shared helpers for the integration tests: fake backends, a fake clock,
//! config builders, and tracing setup.

pub mod builders;
pub mod fakes;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing once per test binary.
///
/// Output goes through the per-test writer, so the harness only prints it for
/// failing tests (or under `-- --nocapture`). Levels come from
/// `STAGEHAND_LOG`, falling back to `RUST_LOG`, then `info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("STAGEHAND_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if the future does not complete within `secs` seconds.
///
/// The session core only sleeps through its injected clock, so against fakes
/// everything should finish near-instantly; a hang here means a probe queue
/// was mis-scripted.
pub async fn within<F: Future>(secs: u64, f: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(secs), f)
        .await
        .unwrap_or_else(|_| panic!("test did not complete within {secs}s"))
}

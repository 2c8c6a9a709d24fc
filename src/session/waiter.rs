// src/session/waiter.rs

//! Generic blocking poll-until-true-or-timeout primitive.

use std::time::Duration;

use crate::errors::Result;
use crate::session::clock::Clock;

/// How a single bounded wait behaves. Immutable once constructed.
#[derive(Debug, Clone, Copy)]
pub struct WaitSpec {
    pub timeout: Duration,
    pub poll_period: Duration,
}

impl WaitSpec {
    /// A wait with the default 1-second poll period.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_period: Duration::from_secs(1),
        }
    }

    pub fn with_poll_period(mut self, poll_period: Duration) -> Self {
        self.poll_period = poll_period;
        self
    }
}

/// Repeatedly evaluate `probe` at roughly `poll_period` intervals until it
/// returns true or `timeout` of elapsed time has passed.
///
/// - Returns `Ok(true)` on the first true evaluation, with no further polls.
/// - Returns `Ok(false)` once the timeout elapses without a true evaluation.
///   A zero timeout evaluates the probe exactly once.
/// - Probe errors are not caught here; they propagate to the caller. Callers
///   that need resilience wrap the probe themselves.
///
/// The only observable side effect is blocking the calling task for up to
/// `timeout`.
pub async fn wait_until<F>(clock: &dyn Clock, spec: WaitSpec, mut probe: F) -> Result<bool>
where
    F: FnMut() -> Result<bool>,
{
    let started = clock.monotonic();

    loop {
        if probe()? {
            return Ok(true);
        }

        let elapsed = clock.monotonic().saturating_sub(started);
        if elapsed >= spec.timeout {
            return Ok(false);
        }

        clock.sleep(spec.poll_period).await;
    }
}

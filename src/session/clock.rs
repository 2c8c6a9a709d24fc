// src/session/clock.rs

//! Injected time capability.
//!
//! The session core never reads ambient wall-clock time or sleeps directly;
//! everything goes through [`Clock`] so tests can simulate elapsed time
//! without real delays and assert exact wait behaviour.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

/// Time as seen by the session core.
pub trait Clock: Send + Sync {
    /// Monotonic elapsed time since some fixed origin (e.g. clock creation).
    /// Only differences are meaningful.
    fn monotonic(&self) -> Duration;

    /// Current wall-clock time in the local timezone. Used for the reschedule
    /// decision and the resume-at notification.
    fn local_now(&self) -> NaiveDateTime;

    /// Suspend the calling task for the given duration.
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Production clock backed by `Instant`, `chrono::Local` and `tokio::time`.
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }

    fn local_now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

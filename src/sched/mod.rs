// src/sched/mod.rs

//! Reschedule timing for loop mode.
//!
//! Pure arithmetic over a point-in-time resource read and an injected clock
//! value: no side effects, no IO. The caller guards the precondition
//! `current_power < power_limit`; at or above the limit there is nothing to
//! wait for and [`compute_next_run`] must not be invoked.

use std::time::Duration;

use chrono::NaiveDateTime;
use rand::Rng;

/// The resource regenerates at one unit per six minutes.
pub const POWER_REGEN_SECS: u64 = 360;

/// Jitter added to the daily-reset branch, uniform in
/// `[RESET_JITTER_MIN_SECS, RESET_JITTER_MAX_SECS]`. Avoids clock-boundary
/// clustering and a run landing at e.g. 03:59.
pub const RESET_JITTER_MIN_SECS: u64 = 30;
pub const RESET_JITTER_MAX_SECS: u64 = 600;

/// Point-in-time read of the regenerating resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSnapshot {
    pub current_power: u32,
    pub power_limit: u32,
}

/// Output of the reschedule decision; consumed once by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDecision {
    /// How long to sleep before the next automation pass.
    pub wait: Duration,
    /// The wall-clock time that wait represents (`now + wait`, exactly).
    pub resume_at: NaiveDateTime,
}

/// Compute when the next automation pass should start.
///
/// Two independent bounds:
/// - the resource cap: `(limit - current) * 360` seconds until power is full
///   (never jittered);
/// - the next daily reset: seconds until `daily_reset_hour:00` local time,
///   plus jitter.
///
/// The earlier of the two wins.
pub fn compute_next_run(
    snapshot: ResourceSnapshot,
    now: NaiveDateTime,
    daily_reset_hour: u32,
    rng: &mut impl Rng,
) -> ScheduleDecision {
    debug_assert!(
        snapshot.current_power < snapshot.power_limit,
        "compute_next_run called with power already at the limit"
    );

    let deficit = u64::from(snapshot.power_limit.saturating_sub(snapshot.current_power));
    let wait_by_resource_cap = deficit * POWER_REGEN_SECS;

    let jitter = rng.gen_range(RESET_JITTER_MIN_SECS..=RESET_JITTER_MAX_SECS);
    let wait_by_daily_reset = seconds_until_reset(now, daily_reset_hour) + jitter;

    let wait_secs = wait_by_resource_cap.min(wait_by_daily_reset);

    ScheduleDecision {
        wait: Duration::from_secs(wait_secs),
        resume_at: now + chrono::Duration::seconds(wait_secs as i64),
    }
}

/// Seconds until the next occurrence of `hour:00` local time, strictly after
/// `now` (a run at exactly the reset hour schedules for the next day).
pub fn seconds_until_reset(now: NaiveDateTime, hour: u32) -> u64 {
    let hour = hour.min(23);

    // hour is clamped to a valid value, so this never falls back.
    let reset_today = now.date().and_hms_opt(hour, 0, 0).unwrap_or(now);

    let next = if now < reset_today {
        reset_today
    } else {
        reset_today + chrono::Duration::days(1)
    };

    (next - now).num_seconds().max(0) as u64
}

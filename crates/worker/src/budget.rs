//! Per-tick budget enforcement and adaptive sleep (spec §4.3), kept as
//! pure functions over the fields the pipeline driver already tracks so
//! the stop-reason logic is unit-testable without a running worker.

use chrono::{DateTime, Utc};
use gk_core::{SlotConfig, StopReason};
use std::time::Duration;

/// Evaluates the three per-tick budget checks in spec order: schedule,
/// max runtime, then lead target. Returns the first tripped reason, if
/// any — at most one stop is requested per tick.
#[allow(clippy::too_many_arguments)]
pub fn check_budgets(
    config: &SlotConfig,
    now: DateTime<Utc>,
    run_started_at: Option<DateTime<Utc>>,
    leads_parsed: u64,
    run_leads_start: u64,
) -> Option<StopReason> {
    if !crate::schedule::is_open(&config.client_schedule, now) {
        return Some(StopReason::OutsideSchedule);
    }

    if config.max_run_minutes > 0 {
        if let Some(started) = run_started_at {
            let elapsed_minutes = (now - started).num_minutes();
            if elapsed_minutes >= config.max_run_minutes as i64 {
                return Some(StopReason::MaxRuntimeReached);
            }
        }
    }

    if config.max_clicks_per_run > 0 {
        let delta = leads_parsed.saturating_sub(run_leads_start);
        if delta >= config.max_clicks_per_run as u64 {
            return Some(StopReason::LeadTargetReached);
        }
    }

    None
}

/// Piecewise adaptive cooldown from spec §4.3: `<5% -> 2s, <15% -> 5s,
/// <30% -> 10s, else 20s`.
pub fn adaptive_sleep(error_rate: f64) -> Duration {
    if error_rate < 0.05 {
        Duration::from_secs(2)
    } else if error_rate < 0.15 {
        Duration::from_secs(5)
    } else if error_rate < 0.30 {
        Duration::from_secs(10)
    } else {
        Duration::from_secs(20)
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;

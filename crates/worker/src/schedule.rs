//! Client schedule evaluation: whether `now` falls inside the allowed
//! day/window for a slot's `client_schedule` (spec §4.3 budget enforcement,
//! first bullet). No teacher analog; the timezone-aware window check is
//! enriched from the pack's `chrono-tz` usage (`ScreenerBot`, `banner`
//! manifests) since the distilled spec names a `timezone` field the
//! original system's naive string-window comparison did not actually honor.

use chrono::{DateTime, Datelike, NaiveTime, Utc};
use chrono_tz::Tz;
use gk_core::ClientSchedule;

const DAY_ABBREVIATIONS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let (h, m) = s.split_once(':')?;
    NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, 0)
}

/// True iff `now` falls inside the schedule's allowed day/window. A
/// disabled schedule always allows; an empty `days` list allows every day.
/// An unparseable timezone or window falls back to UTC / "always open"
/// respectively, matching the worker's general policy of never tripping
/// on its own misconfiguration.
pub fn is_open(schedule: &ClientSchedule, now: DateTime<Utc>) -> bool {
    if !schedule.enabled {
        return true;
    }

    let tz: Tz = schedule.timezone.parse().unwrap_or(chrono_tz::UTC);
    let local = now.with_timezone(&tz);

    if !schedule.days.is_empty() {
        let today = DAY_ABBREVIATIONS[local.weekday().num_days_from_sunday() as usize];
        if !schedule.days.iter().any(|d| d.to_lowercase() == today) {
            return false;
        }
    }

    let (Some(start), Some(end)) = (
        parse_hhmm(&schedule.window_start),
        parse_hhmm(&schedule.window_end),
    ) else {
        return true;
    };

    let now_time = local.time();
    if start <= end {
        now_time >= start && now_time <= end
    } else {
        // Window wraps past midnight.
        now_time >= start || now_time <= end
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;

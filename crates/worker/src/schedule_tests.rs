use super::*;
use chrono::TimeZone;
use gk_core::ClientSchedule;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn disabled_schedule_is_always_open() {
    let schedule = ClientSchedule {
        enabled: false,
        ..Default::default()
    };
    assert!(is_open(&schedule, dt(2026, 1, 1, 3, 0)));
}

#[test]
fn within_window_is_open() {
    let schedule = ClientSchedule {
        enabled: true,
        window_start: "09:00".to_string(),
        window_end: "17:00".to_string(),
        ..Default::default()
    };
    assert!(is_open(&schedule, dt(2026, 1, 1, 12, 0)));
}

#[test]
fn outside_window_is_closed() {
    let schedule = ClientSchedule {
        enabled: true,
        window_start: "09:00".to_string(),
        window_end: "17:00".to_string(),
        ..Default::default()
    };
    assert!(!is_open(&schedule, dt(2026, 1, 1, 20, 0)));
}

#[test]
fn wraparound_window_spans_midnight() {
    let schedule = ClientSchedule {
        enabled: true,
        window_start: "22:00".to_string(),
        window_end: "06:00".to_string(),
        ..Default::default()
    };
    assert!(is_open(&schedule, dt(2026, 1, 1, 23, 30)));
    assert!(is_open(&schedule, dt(2026, 1, 1, 1, 0)));
    assert!(!is_open(&schedule, dt(2026, 1, 1, 12, 0)));
}

#[test]
fn empty_days_list_allows_every_day() {
    let schedule = ClientSchedule {
        enabled: true,
        days: Vec::new(),
        ..Default::default()
    };
    assert!(is_open(&schedule, dt(2026, 1, 4, 12, 0))); // a Sunday
}

#[test]
fn restricted_days_exclude_others() {
    let schedule = ClientSchedule {
        enabled: true,
        days: vec!["mon".to_string(), "tue".to_string()],
        ..Default::default()
    };
    // 2026-01-04 is a Sunday.
    assert!(!is_open(&schedule, dt(2026, 1, 4, 12, 0)));
    // 2026-01-05 is a Monday.
    assert!(is_open(&schedule, dt(2026, 1, 5, 12, 0)));
}

#[test]
fn unparseable_timezone_falls_back_to_utc_instead_of_panicking() {
    let schedule = ClientSchedule {
        enabled: true,
        timezone: "Not/A_Zone".to_string(),
        window_start: "09:00".to_string(),
        window_end: "17:00".to_string(),
        ..Default::default()
    };
    assert!(is_open(&schedule, dt(2026, 1, 1, 12, 0)));
}

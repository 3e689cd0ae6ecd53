use super::*;
use chrono::Duration;

#[test]
fn error_rate_uses_floor_of_one_page_fetched() {
    let mut m = Metrics::default();
    m.errors = 3;
    m.pages_fetched = 0;
    m.recompute_error_rate();
    assert_eq!(m.error_rate, 3.0);
}

#[test]
fn error_rate_rounds_to_three_decimals() {
    let mut m = Metrics::default();
    m.errors = 1;
    m.pages_fetched = 3;
    m.recompute_error_rate();
    assert_eq!(m.error_rate, 0.333);
}

#[test]
fn record_error_increments_and_sets_last_error() {
    let mut m = Metrics::default();
    m.pages_fetched = 10;
    m.record_error("boom");
    assert_eq!(m.errors, 1);
    assert_eq!(m.last_error.as_deref(), Some("boom"));
    assert_eq!(m.error_rate, 0.1);
}

#[test]
fn set_phase_accumulates_prior_phase_duration() {
    let mut m = Metrics::default();
    let t0 = Utc::now();
    m.set_phase(Phase::FetchRecent, t0);
    assert_eq!(m.phase, Phase::FetchRecent);
    assert_eq!(m.phase_duration_sec, 0.0);

    let t1 = t0 + Duration::seconds(5);
    m.set_phase(Phase::ParseRecent, t1);
    assert_eq!(m.phase, Phase::ParseRecent);
    assert_eq!(m.phase_duration_sec, 5.0);
}

#[test]
fn update_throughput_is_leads_per_minute() {
    let mut m = Metrics::default();
    m.update_throughput(10, 60.0);
    assert_eq!(m.throughput, 10.0);
    m.update_throughput(5, 30.0);
    assert_eq!(m.throughput, 10.0);
}

#[test]
fn default_metrics_serializes_without_optional_noise() {
    let m = Metrics::default();
    let json = serde_json::to_value(&m).unwrap();
    assert!(json.get("last_error").is_none());
    assert!(json.get("phase_started_at").is_none());
}

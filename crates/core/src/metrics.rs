//! Per-slot runtime metrics, owned exclusively by the worker.

use crate::status::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters and gauges embedded in [`crate::Slot`]. The worker is the sole
/// writer; the supervisor and control plane only read this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub pages_fetched: u64,
    #[serde(default)]
    pub leads_parsed: u64,
    #[serde(default)]
    pub clicked_total: u64,
    #[serde(default)]
    pub verified_total: u64,
    #[serde(default)]
    pub rejected_total: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub throughput: f64,
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default)]
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub phase_duration_sec: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            pages_fetched: 0,
            leads_parsed: 0,
            clicked_total: 0,
            verified_total: 0,
            rejected_total: 0,
            errors: 0,
            throughput: 0.0,
            error_rate: 0.0,
            phase: Phase::Init,
            phase_started_at: None,
            phase_duration_sec: 0.0,
            last_action: None,
            last_error: None,
        }
    }
}

impl Metrics {
    /// Recompute `error_rate = errors / max(pages_fetched, 1)`, rounded to
    /// three decimals to match the original worker's reporting precision.
    pub fn recompute_error_rate(&mut self) {
        let denom = self.pages_fetched.max(1) as f64;
        self.error_rate = (self.errors as f64 / denom * 1000.0).round() / 1000.0;
    }

    /// Record a transient or unhandled error: increments `errors`, sets
    /// `last_error`, and recomputes `error_rate`.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors += 1;
        self.last_error = Some(message.into());
        self.recompute_error_rate();
    }

    /// Move to a new phase, accumulating `phase_duration_sec` for the phase
    /// just left.
    pub fn set_phase(&mut self, phase: Phase, now: DateTime<Utc>) {
        if let Some(started) = self.phase_started_at {
            self.phase_duration_sec = (now - started).num_milliseconds() as f64 / 1000.0;
        }
        self.phase = phase;
        self.phase_started_at = Some(now);
    }

    /// Recompute `throughput` (leads/min) from a delta of `leads_parsed`
    /// over wall-clock time.
    pub fn update_throughput(&mut self, leads_delta: u64, elapsed_secs: f64) {
        if elapsed_secs > 0.0 {
            self.throughput = (leads_delta as f64 / elapsed_secs) * 60.0;
        }
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;

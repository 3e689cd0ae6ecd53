//! Time abstraction so lifecycle and reconciliation logic can be tested
//! without real sleeps.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A source of the current time. Production code uses [`SystemClock`];
/// tests use [`FakeClock`] and advance it explicitly.
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via `chrono::Utc::now()`.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A controllable clock for deterministic tests. Starts at a fixed epoch
/// and only advances when told to.
#[derive(Clone)]
pub struct FakeClock {
    millis_since_epoch: Arc<AtomicI64>,
}

impl FakeClock {
    /// Starts at 2024-01-01T00:00:00Z.
    pub fn new() -> Self {
        let epoch = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .expect("fixed literal is valid rfc3339")
            .timestamp_millis();
        Self {
            millis_since_epoch: Arc::new(AtomicI64::new(epoch)),
        }
    }

    pub fn at(dt: DateTime<Utc>) -> Self {
        Self {
            millis_since_epoch: Arc::new(AtomicI64::new(dt.timestamp_millis())),
        }
    }

    pub fn advance(&self, duration: chrono::Duration) {
        self.millis_since_epoch
            .fetch_add(duration.num_milliseconds(), Ordering::SeqCst);
    }

    pub fn set(&self, dt: DateTime<Utc>) {
        self.millis_since_epoch
            .store(dt.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis_since_epoch.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

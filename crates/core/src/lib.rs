#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shared data model for GridKeeper: slot/lead/metrics/node records, id
//! newtypes, the status/phase/command enums, and a testable clock.

pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod lead;
pub mod metrics;
pub mod node;
pub mod slot;
pub mod status;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ClientSchedule, SlotConfig, DEFAULT_MAX_AGE_SECONDS};
pub use error::ErrorCategory;
pub use id::{IdGen, LeadId, NodeId, RemoteLoginSessionId, SequentialIdGen, ShortId, SlotId, UuidIdGen};
pub use lead::{lead_key, Lead, LeadFingerprint, LeadStatus, RejectedReason};
pub use metrics::Metrics;
pub use node::Node;
pub use slot::{Slot, DEFAULT_WORKER_KIND};
pub use status::{Command, Mode, Phase, SlotStatus, StopReason};

/// Test-only builders re-exported for other crates' dev-dependencies when
/// the `test-support` feature is enabled.
#[cfg(feature = "test-support")]
pub mod test_support {
    use super::*;
    use chrono::Utc;

    pub fn sample_slot(id: &str) -> Slot {
        Slot::new_default(SlotId::new(id))
    }

    pub fn running_slot(id: &str, pid: u32) -> Slot {
        let mut slot = sample_slot(id);
        slot.mark_started(pid, Utc::now());
        slot.status = SlotStatus::Running;
        slot
    }
}

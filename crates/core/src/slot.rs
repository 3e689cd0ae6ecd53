//! The tenant-scoped scraping unit and its state-document representation.

use crate::config::SlotConfig;
use crate::id::SlotId;
use crate::metrics::Metrics;
use crate::status::{Command, Mode, SlotStatus, StopReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default worker kind for newly created slots, matching
/// `DEFAULT_SLOT_WORKER` in the original system.
pub const DEFAULT_WORKER_KIND: &str = "indiamart_worker";

/// The per-slot state document. Per §3 Ownership: the supervisor exclusively
/// mutates `pid`, `status`, and `stop_reason`/`stop_detail`; the worker
/// exclusively mutates `metrics`, `last_heartbeat`, and run baselines; the
/// control plane exclusively mutates `command`, `mode`, and config fields
/// (config itself lives in a sibling document, see [`SlotConfig`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default = "default_worker")]
    pub worker: String,
    /// Reserved for future automatic-restart behavior. Currently inert —
    /// see design notes open question 2: it must not trigger restarts.
    #[serde(default)]
    pub auto_resume: bool,

    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_command: Option<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_detail: Option<String>,

    #[serde(default)]
    pub metrics: Metrics,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub run_leads_start: u64,
    #[serde(default)]
    pub run_clicked_start: u64,

    /// Unknown on-disk fields, preserved verbatim across read/write cycles
    /// per §9 design note ("Unknown fields ... must be preserved").
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_mode() -> Mode {
    Mode::Active
}

fn default_worker() -> String {
    DEFAULT_WORKER_KIND.to_string()
}

impl Slot {
    /// A freshly created slot document with every field defaulted, matching
    /// `ensure_state_defaults` in the original supervisor.
    pub fn new_default(id: SlotId) -> Self {
        Self {
            id,
            mode: default_mode(),
            worker: default_worker(),
            auto_resume: false,
            status: SlotStatus::Stopped,
            pid: None,
            started_at: None,
            last_heartbeat: None,
            last_command: None,
            stop_reason: None,
            stop_detail: None,
            metrics: Metrics::default(),
            run_started_at: None,
            run_leads_start: 0,
            run_clicked_start: 0,
            extra: Map::new(),
        }
    }

    /// A slot's PID must be non-null iff it is in a status that expects a
    /// live process. See §3 invariants.
    pub fn pid_invariant_holds(&self) -> bool {
        self.pid.is_some() == self.status.expects_live_process()
    }

    /// `OBSERVER` slots never run; a START against one must be refused by
    /// the supervisor before any process is spawned.
    pub fn start_allowed(&self) -> bool {
        !matches!(self.mode, Mode::Observer)
    }

    /// Clears run-transition fields and marks the slot stopped with a
    /// reason, mirroring the supervisor's post-`stop_runner` bookkeeping.
    pub fn mark_stopped(&mut self, reason: StopReason, detail: Option<String>) {
        self.status = SlotStatus::Stopped;
        self.pid = None;
        self.started_at = None;
        self.last_heartbeat = None;
        self.stop_reason = Some(reason);
        self.stop_detail = detail;
    }

    pub fn mark_dead(&mut self, reason: StopReason) {
        self.status = SlotStatus::Dead;
        self.pid = None;
        self.stop_reason = Some(reason);
    }

    pub fn mark_paused(&mut self) {
        self.status = SlotStatus::Paused;
        self.pid = None;
    }

    /// Records a successful spawn: PID, start time, and a seeded heartbeat
    /// so the startup grace window absorbs browser warm-up before the first
    /// real heartbeat lands (§4.2 step 3).
    pub fn mark_started(&mut self, pid: u32, now: DateTime<Utc>) {
        self.status = SlotStatus::Starting;
        self.pid = Some(pid);
        self.started_at = Some(now);
        self.last_heartbeat = Some(now);
        self.stop_reason = None;
        self.stop_detail = None;
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;

//! Status, mode, command, and phase enums shared by the slot state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared operating mode for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Active,
    Observer,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Active
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Active => write!(f, "ACTIVE"),
            Mode::Observer => write!(f, "OBSERVER"),
        }
    }
}

/// Observed/derived status of a slot, driven exclusively by the supervisor's
/// reconciliation loop (see [`crate::Slot`] ownership rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotStatus {
    Stopped,
    Starting,
    Running,
    Paused,
    Stopping,
    Dead,
    NeedsLogin,
    Error,
}

impl Default for SlotStatus {
    fn default() -> Self {
        SlotStatus::Stopped
    }
}

impl SlotStatus {
    /// Statuses for which a live worker process is expected to exist.
    pub fn expects_live_process(&self) -> bool {
        matches!(
            self,
            SlotStatus::Starting | SlotStatus::Running | SlotStatus::Stopping
        )
    }

    pub fn is_terminal_for_sweep(&self) -> bool {
        matches!(
            self,
            SlotStatus::Stopped | SlotStatus::Paused | SlotStatus::Dead
        )
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlotStatus::Stopped => "STOPPED",
            SlotStatus::Starting => "STARTING",
            SlotStatus::Running => "RUNNING",
            SlotStatus::Paused => "PAUSED",
            SlotStatus::Stopping => "STOPPING",
            SlotStatus::Dead => "DEAD",
            SlotStatus::NeedsLogin => "NEEDS_LOGIN",
            SlotStatus::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// The operator command most recently written to the state document.
/// Owned exclusively by the control plane; consumed (and cleared) by the
/// supervisor during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Command {
    Start,
    Stop,
    Pause,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Command::Start => "START",
            Command::Stop => "STOP",
            Command::Pause => "PAUSE",
        };
        write!(f, "{s}")
    }
}

/// A supervisor- or worker-assigned reason explaining why a slot stopped.
/// `Other` preserves forward-compatible values round-tripped from disk that
/// this binary does not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    NoHeartbeat,
    HeartbeatTimeout,
    DeadPid,
    LeadTargetReached,
    OutsideSchedule,
    MaxRuntimeReached,
    UnhandledError,
    LoginRequired,
    Manual,
    Other(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::NoHeartbeat => "no_heartbeat",
            StopReason::HeartbeatTimeout => "heartbeat_timeout",
            StopReason::DeadPid => "dead_pid",
            StopReason::LeadTargetReached => "lead_target_reached",
            StopReason::OutsideSchedule => "outside_schedule",
            StopReason::MaxRuntimeReached => "max_runtime_reached",
            StopReason::UnhandledError => "unhandled_error",
            StopReason::LoginRequired => "login_required",
            StopReason::Manual => "manual",
            StopReason::Other(s) => s,
        };
        write!(f, "{s}")
    }
}

impl From<&str> for StopReason {
    fn from(s: &str) -> Self {
        match s {
            "no_heartbeat" => StopReason::NoHeartbeat,
            "heartbeat_timeout" => StopReason::HeartbeatTimeout,
            "dead_pid" => StopReason::DeadPid,
            "lead_target_reached" => StopReason::LeadTargetReached,
            "outside_schedule" => StopReason::OutsideSchedule,
            "max_runtime_reached" => StopReason::MaxRuntimeReached,
            "unhandled_error" => StopReason::UnhandledError,
            "login_required" => StopReason::LoginRequired,
            "manual" => StopReason::Manual,
            other => StopReason::Other(other.to_string()),
        }
    }
}

impl Serialize for StopReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StopReason {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(StopReason::from(s.as_str()))
    }
}

/// Pipeline phase, mirrored into `Metrics::phase` for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Init,
    FetchRecent,
    ParseRecent,
    ClickLeads,
    FetchVerified,
    ParseVerified,
    WriteLeads,
    Cooldown,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Init
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Init => "init",
            Phase::FetchRecent => "fetch_recent",
            Phase::ParseRecent => "parse_recent",
            Phase::ClickLeads => "click_leads",
            Phase::FetchVerified => "fetch_verified",
            Phase::ParseVerified => "parse_verified",
            Phase::WriteLeads => "write_leads",
            Phase::Cooldown => "cooldown",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

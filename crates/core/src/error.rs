//! Shared error taxonomy (§7). Each crate's concrete error enum maps onto
//! one of these categories via `category()`, the way a caller decides
//! whether to retry, surface a status code, or self-stop.

use std::fmt;

/// High-level disposition for any error raised inside the pipeline,
/// supervisor, or federation router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Retry with backoff; does not change slot status.
    TransientIo,
    /// Surface the upstream HTTP status/body verbatim.
    UpstreamHttp,
    /// Mark the slot `NEEDS_LOGIN` and attempt a cookie refresh.
    AuthRequired,
    /// Reject the request with 400; never mutate persisted state.
    ConfigInvalid,
    /// Worker self-stops with a budget-derived reason.
    BudgetExceeded,
    /// Worker self-stops with `outside_schedule`.
    ScheduleClosed,
    /// Supervisor transitions the slot to `STOPPED`/`DEAD`.
    ProcessDead,
    /// Supervisor transitions the slot to `DEAD`.
    HeartbeatTimeout,
    /// Record the error and enter cooldown; no state transition.
    Unhandled,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::TransientIo => "transient_io",
            ErrorCategory::UpstreamHttp => "upstream_http",
            ErrorCategory::AuthRequired => "auth_required",
            ErrorCategory::ConfigInvalid => "config_invalid",
            ErrorCategory::BudgetExceeded => "budget_exceeded",
            ErrorCategory::ScheduleClosed => "schedule_closed",
            ErrorCategory::ProcessDead => "process_dead",
            ErrorCategory::HeartbeatTimeout => "heartbeat_timeout",
            ErrorCategory::Unhandled => "unhandled",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_is_snake_case() {
        assert_eq!(ErrorCategory::AuthRequired.to_string(), "auth_required");
        assert_eq!(ErrorCategory::BudgetExceeded.to_string(), "budget_exceeded");
    }
}

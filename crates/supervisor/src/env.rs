//! Centralized environment variable access for the supervisor crate, using
//! an override-then-fallback pattern for every tunable.

use gk_core::Mode;
use std::path::PathBuf;
use std::time::Duration;

use crate::SupervisorError;

/// Resolve the root directory holding one subdirectory per slot:
/// `GK_SLOTS_ROOT` > `XDG_STATE_HOME/gridkeeper/slots` > `~/.local/state/gridkeeper/slots`.
pub fn slots_root() -> Result<PathBuf, SupervisorError> {
    if let Ok(dir) = std::env::var("GK_SLOTS_ROOT") {
        return Ok(PathBuf::from(dir));
    }
    Ok(state_dir()?.join("slots"))
}

/// Resolve the supervisor's own state directory (pid file, log file):
/// `GK_STATE_DIR` > `XDG_STATE_HOME/gridkeeper` > `~/.local/state/gridkeeper`.
pub fn state_dir() -> Result<PathBuf, SupervisorError> {
    if let Ok(dir) = std::env::var("GK_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("gridkeeper"));
    }
    let home = std::env::var("HOME").map_err(|_| SupervisorError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/gridkeeper"))
}

/// Root directory holding one browser-profile subdirectory per slot:
/// `GK_PROFILES_ROOT`, defaulting to a sibling of [`slots_root`].
pub fn profiles_root() -> Result<PathBuf, SupervisorError> {
    if let Ok(dir) = std::env::var("GK_PROFILES_ROOT") {
        return Ok(PathBuf::from(dir));
    }
    Ok(state_dir()?.join("profiles"))
}

/// `HEARTBEAT_TIMEOUT` (spec §4.2 tunable, default 30s).
pub fn heartbeat_timeout() -> Duration {
    duration_override("GK_HEARTBEAT_TIMEOUT_SECONDS").unwrap_or(Duration::from_secs(30))
}

/// `STARTUP_GRACE` (spec §4.2 tunable, default 60s).
pub fn startup_grace() -> Duration {
    duration_override("GK_STARTUP_GRACE_SECONDS").unwrap_or(Duration::from_secs(60))
}

/// `CHECK_INTERVAL` (spec §4.2 tunable, default 3s).
pub fn check_interval() -> Duration {
    duration_override("GK_CHECK_INTERVAL_SECONDS").unwrap_or(Duration::from_secs(3))
}

fn duration_override(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_secs)
}

/// `DEFAULT_SLOT_WORKER`, matching `Slot::new_default`'s own fallback
/// unless the deployment overrides it.
pub fn default_slot_worker() -> String {
    std::env::var("GK_DEFAULT_SLOT_WORKER").unwrap_or_else(|_| gk_core::DEFAULT_WORKER_KIND.to_string())
}

/// `DEFAULT_SLOT_MODE`: `active` (default) or `observer`.
pub fn default_slot_mode() -> Mode {
    match std::env::var("GK_DEFAULT_SLOT_MODE").as_deref() {
        Ok("observer") | Ok("OBSERVER") => Mode::Observer,
        _ => Mode::Active,
    }
}

/// Path to the `gk-workerd` binary to spawn: `GK_WORKER_BIN`, defaulting
/// to a binary named `gk-workerd` alongside the current executable.
pub fn worker_bin() -> Result<PathBuf, SupervisorError> {
    if let Ok(path) = std::env::var("GK_WORKER_BIN") {
        return Ok(PathBuf::from(path));
    }
    let exe = std::env::current_exe().map_err(|_| SupervisorError::NoStateDir)?;
    let dir = exe.parent().ok_or(SupervisorError::NoStateDir)?;
    Ok(dir.join("gk-workerd"))
}

/// The portal's recent-leads page URL (spec §4.3 FETCH_RECENT), resolved
/// once per node rather than hardcoded into the worker binary.
pub fn portal_recent_url() -> String {
    std::env::var("GK_PORTAL_RECENT_URL")
        .unwrap_or_else(|_| "https://seller.indiamart.com/leadmanager/recent".to_string())
}

/// The portal's past-transactions page URL (spec §4.3 FETCH_VERIFIED).
pub fn portal_verified_url() -> String {
    std::env::var("GK_PORTAL_VERIFIED_URL")
        .unwrap_or_else(|_| "https://seller.indiamart.com/leadmanager/verified".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

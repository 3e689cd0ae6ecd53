//! One pass of slot reconciliation (spec §4.2 steps 2-5): commands are
//! applied before liveness is checked, so a START issued in the same tick
//! as a dead-process detection still gets acted on.

use gk_adapters::process::ProcessAdapter;
use gk_core::{Clock, Command, Slot, SlotId, SlotStatus, StopReason};
use gk_storage::SlotPaths;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything reconciliation needs to spawn a worker, beyond the slot
/// itself: where the binary lives, where its profile directory goes, and
/// the portal URLs it's handed (spec.md names no concrete URLs; these are
/// resolved once here rather than hardcoded into the worker).
pub struct WorkerSpawnConfig {
    pub worker_bin: PathBuf,
    pub profiles_root: PathBuf,
    pub recent_url: String,
    pub verified_url: String,
    pub allow_detail_click: bool,
    pub heartbeat_timeout: Duration,
    pub startup_grace: Duration,
}

/// What happened to a slot during one reconciliation pass, surfaced for
/// logging at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Unchanged,
    Started { pid: u32 },
    StartRefused,
    SpawnFailed { detail: String },
    Stopped,
    Paused,
    DiedPid,
    DiedNoHeartbeat,
    DiedHeartbeatTimeout,
    Swept,
}

/// Reconciles one slot in place and returns what changed. Does not persist
/// `slot` — the caller writes the state document after inspecting the
/// outcome, matching `write_state`'s atomic-rename contract.
pub async fn reconcile_slot<P: ProcessAdapter, C: Clock>(
    slot: &mut Slot,
    slot_dir: &Path,
    process: &P,
    clock: &C,
    cfg: &WorkerSpawnConfig,
) -> ReconcileOutcome {
    let now = clock.now();

    if let Some(command) = slot.last_command.take() {
        return apply_command(slot, slot_dir, process, now, cfg, command).await;
    }

    if slot.status.is_terminal_for_sweep() && slot.pid.is_some() {
        sweep_pid(slot, process).await;
        return ReconcileOutcome::Swept;
    }

    if slot.status.expects_live_process() {
        return check_liveness(slot, process, now, cfg).await;
    }

    ReconcileOutcome::Unchanged
}

async fn apply_command<P: ProcessAdapter>(
    slot: &mut Slot,
    slot_dir: &Path,
    process: &P,
    now: chrono::DateTime<chrono::Utc>,
    cfg: &WorkerSpawnConfig,
    command: Command,
) -> ReconcileOutcome {
    match command {
        Command::Start => {
            if !slot.start_allowed() {
                return ReconcileOutcome::StartRefused;
            }
            // Sweep any stray process a previous cycle left behind before
            // spawning a fresh one; a pid-only adapter has no way to find
            // strays other than the one this slot already knows about.
            if let Some(stray) = slot.pid {
                if process.is_alive(stray).await.unwrap_or(false) {
                    let _ = process.stop(stray).await;
                }
            }
            spawn(slot, slot_dir, process, now, cfg).await
        }
        Command::Stop => {
            if let Some(pid) = slot.pid {
                let _ = process.stop(pid).await;
            }
            slot.mark_stopped(StopReason::Manual, None);
            ReconcileOutcome::Stopped
        }
        Command::Pause => {
            if let Some(pid) = slot.pid {
                let _ = process.stop(pid).await;
            }
            slot.mark_paused();
            ReconcileOutcome::Paused
        }
    }
}

async fn spawn<P: ProcessAdapter>(
    slot: &mut Slot,
    slot_dir: &Path,
    process: &P,
    now: chrono::DateTime<chrono::Utc>,
    cfg: &WorkerSpawnConfig,
) -> ReconcileOutcome {
    let paths = SlotPaths::new(slot_dir.to_path_buf());
    let profile_dir = cfg.profiles_root.join(slot.id.as_str());
    let args = vec![
        "--slot-dir".to_string(),
        paths.dir.display().to_string(),
        "--profile-dir".to_string(),
        profile_dir.display().to_string(),
        "--recent-url".to_string(),
        cfg.recent_url.clone(),
        "--verified-url".to_string(),
        cfg.verified_url.clone(),
    ];
    let args = if cfg.allow_detail_click {
        [args, vec!["--allow-detail-click".to_string()]].concat()
    } else {
        args
    };
    let env = HashMap::new();
    let program = cfg.worker_bin.to_string_lossy().to_string();

    match process.spawn(&program, &args, slot_dir, &env, &paths.worker_log()).await {
        Ok(pid) => {
            slot.mark_started(pid, now);
            ReconcileOutcome::Started { pid }
        }
        Err(e) => {
            slot.status = SlotStatus::Error;
            slot.stop_reason = Some(StopReason::Other("spawn_failed".to_string()));
            slot.stop_detail = Some(e.to_string());
            ReconcileOutcome::SpawnFailed { detail: e.to_string() }
        }
    }
}

async fn sweep_pid<P: ProcessAdapter>(slot: &mut Slot, process: &P) {
    if let Some(pid) = slot.pid.take() {
        if process.is_alive(pid).await.unwrap_or(false) {
            let _ = process.stop(pid).await;
        }
    }
    slot.last_heartbeat = None;
}

async fn check_liveness<P: ProcessAdapter>(
    slot: &mut Slot,
    process: &P,
    now: chrono::DateTime<chrono::Utc>,
    cfg: &WorkerSpawnConfig,
) -> ReconcileOutcome {
    if let Some(started_at) = slot.started_at {
        let grace = chrono::Duration::from_std(cfg.startup_grace).unwrap_or(chrono::Duration::zero());
        if now - started_at < grace {
            return ReconcileOutcome::Unchanged;
        }
    }

    let pid_alive = match slot.pid {
        Some(pid) => process.is_alive(pid).await.unwrap_or(false),
        None => false,
    };

    if !pid_alive {
        if let Some(pid) = slot.pid {
            let _ = process.terminate(pid).await;
        }
        slot.mark_dead(StopReason::DeadPid);
        return ReconcileOutcome::DiedPid;
    }

    let timeout = chrono::Duration::from_std(cfg.heartbeat_timeout).unwrap_or(chrono::Duration::zero());
    match slot.last_heartbeat {
        None => {
            if let Some(pid) = slot.pid {
                let _ = process.stop(pid).await;
            }
            slot.mark_dead(StopReason::NoHeartbeat);
            ReconcileOutcome::DiedNoHeartbeat
        }
        Some(hb) if now - hb > timeout => {
            if let Some(pid) = slot.pid {
                let _ = process.stop(pid).await;
            }
            slot.mark_dead(StopReason::HeartbeatTimeout);
            ReconcileOutcome::DiedHeartbeatTimeout
        }
        Some(_) => ReconcileOutcome::Unchanged,
    }
}

/// Discovers slot ids under `slots_root` via [`gk_storage::list_slot_dirs`].
pub fn discover_slot_ids(slots_root: &Path) -> std::io::Result<Vec<SlotId>> {
    let dirs = gk_storage::list_slot_dirs(slots_root)?;
    Ok(dirs
        .iter()
        .filter_map(|d| d.file_name().and_then(|n| n.to_str()).map(SlotId::new))
        .collect())
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;

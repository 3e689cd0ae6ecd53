#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! GridKeeper Slot Supervisor (gk-supervisord): the reconciliation loop
//! from spec §4.2, run once per tenant node. Single-instance per
//! `GK_STATE_DIR` via [`gk_supervisor::SupervisorLock`].

use gk_adapters::OsProcessAdapter;
use gk_core::SystemClock;
use gk_storage::{FsAtomicWriter, SlotPaths};
use gk_supervisor::reconcile::{reconcile_slot, WorkerSpawnConfig};
use gk_supervisor::{env, SupervisorError, SupervisorLock};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

fn print_help() {
    println!("gk-supervisord {}", env!("CARGO_PKG_VERSION"));
    println!("GridKeeper slot supervisor - reconciles slot state against OS reality");
    println!();
    println!("The supervisor is typically started alongside the federation service and");
    println!("should not be invoked directly in a managed deployment.");
    println!();
    println!("USAGE:");
    println!("    gk-supervisord");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}

fn setup_logging(log_path: &std::path::Path) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return None;
        }
    }
    let Some(parent) = log_path.parent().map(|p| p.to_path_buf()) else {
        return None;
    };
    let Some(file_name) = log_path.file_name().map(|n| n.to_os_string()) else {
        return None;
    };

    let file_appender = tracing_appender::rolling::never(&parent, &file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("gk-supervisord {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!("Usage: gk-supervisord [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let state_dir = env::state_dir()?;
    let lock_path = state_dir.join("supervisor.pid");
    let log_path = state_dir.join("supervisor.log");
    let _log_guard = setup_logging(&log_path);

    let lock = match SupervisorLock::acquire(&lock_path) {
        Ok(lock) => lock,
        Err(SupervisorError::AlreadyRunning(e)) => {
            eprintln!("gk-supervisord is already running ({e})");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    info!(pid = %lock.path().display(), "gk-supervisord starting");

    let slots_root = env::slots_root()?;
    let profiles_root = env::profiles_root()?;
    let worker_bin = env::worker_bin()?;
    let spawn_cfg = WorkerSpawnConfig {
        worker_bin,
        profiles_root,
        recent_url: env::portal_recent_url(),
        verified_url: env::portal_verified_url(),
        allow_detail_click: false,
        heartbeat_timeout: env::heartbeat_timeout(),
        startup_grace: env::startup_grace(),
    };

    let process = OsProcessAdapter;
    let clock = SystemClock;
    let writer = FsAtomicWriter;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut tick = tokio::time::interval(env::check_interval());

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
            _ = tick.tick() => {
                if let Err(e) = run_pass(&slots_root, &process, &clock, &writer, &spawn_cfg).await {
                    error!("reconciliation pass failed: {e}");
                }
            }
        }
    }

    drop(lock);
    info!("gk-supervisord stopped");
    Ok(())
}

/// One full reconciliation pass over every slot directory. Errors reading
/// or spawning an individual slot are logged and skipped — one bad slot
/// must never stop the loop from reconciling the rest (spec §4.2 "the
/// supervisor itself must never crash").
async fn run_pass(
    slots_root: &std::path::Path,
    process: &OsProcessAdapter,
    clock: &SystemClock,
    writer: &FsAtomicWriter,
    cfg: &WorkerSpawnConfig,
) -> Result<(), SupervisorError> {
    let slot_ids = gk_supervisor::reconcile::discover_slot_ids(slots_root)?;

    for slot_id in slot_ids {
        let slot_dir = slots_root.join(slot_id.as_str());
        let paths = SlotPaths::new(slot_dir.clone());

        let mut slot = match gk_storage::read_or_create_state(writer, &paths, slot_id.clone()) {
            Ok(slot) => slot,
            Err(e) => {
                warn!(slot = %slot_id, "failed to read state: {e}");
                continue;
            }
        };

        let outcome = reconcile_slot(&mut slot, &slot_dir, process, clock, cfg).await;
        if outcome != gk_supervisor::reconcile::ReconcileOutcome::Unchanged {
            info!(slot = %slot_id, outcome = ?outcome, "reconciled");
            if let Err(e) = gk_storage::write_state(writer, &paths, &slot) {
                warn!(slot = %slot_id, "failed to write state: {e}");
            }
        }
    }

    Ok(())
}

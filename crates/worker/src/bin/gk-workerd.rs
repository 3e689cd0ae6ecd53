//! GridKeeper worker daemon (gk-workerd): binds to one slot directory and
//! runs its tick loop until a budget trips or the supervisor signals
//! shutdown. Spawned by `gk-supervisor`, one process per slot (spec §4.2
//! "spawn the worker as a detached child").

use async_trait::async_trait;
use gk_adapters::{BrowserAdapter, BrowserError, ExportedCookie};
use gk_core::SlotId;
use gk_storage::{FsAtomicWriter, SlotPaths};
use gk_worker::WorkerLoop;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Real browser automation is out of scope (spec §1) — no adapter exists in
/// this build, so the worker always runs against `browser: None` and plain
/// HTTP fetches. This type exists only to give `WorkerLoop` a concrete `B`;
/// its methods are unreachable since a `NullBrowserAdapter` is never handed
/// to `WorkerLoop::new` as `Some(..)`.
#[derive(Clone)]
struct NullBrowserAdapter;

#[async_trait]
impl BrowserAdapter for NullBrowserAdapter {
    async fn render_page(&self, _profile_dir: &str, _url: &str) -> Result<String, BrowserError> {
        Err(BrowserError::NavigationFailed(
            "browser automation is not available in this build".to_string(),
        ))
    }

    async fn evaluate_script(&self, _profile_dir: &str, _script: &str) -> Result<String, BrowserError> {
        Err(BrowserError::EvalFailed(
            "browser automation is not available in this build".to_string(),
        ))
    }

    async fn click_by_selector(&self, _profile_dir: &str, selector: &str) -> Result<(), BrowserError> {
        Err(BrowserError::SelectorNotFound(selector.to_string()))
    }

    async fn export_cookies(&self, _profile_dir: &str) -> Result<Vec<ExportedCookie>, BrowserError> {
        Err(BrowserError::NavigationFailed(
            "browser automation is not available in this build".to_string(),
        ))
    }

    async fn new_screencast(&self, _profile_dir: &str) -> Result<String, BrowserError> {
        Err(BrowserError::NavigationFailed(
            "browser automation is not available in this build".to_string(),
        ))
    }
}

struct Args {
    slot_dir: PathBuf,
    profile_dir: String,
    recent_url: String,
    verified_url: String,
    allow_detail_click: bool,
}

fn print_help() {
    println!("gk-workerd {}", env!("CARGO_PKG_VERSION"));
    println!("GridKeeper worker process - runs one slot's scrape pipeline");
    println!();
    println!("The worker is typically spawned by gk-supervisor and should not");
    println!("be invoked directly.");
    println!();
    println!("USAGE:");
    println!("    gk-workerd --slot-dir <DIR> --profile-dir <DIR> --recent-url <URL> --verified-url <URL> [--allow-detail-click]");
    println!();
    println!("OPTIONS:");
    println!("    --slot-dir <DIR>        Directory holding this slot's state documents");
    println!("    --profile-dir <DIR>     Browser profile directory for this slot");
    println!("    --recent-url <URL>      Portal recent-leads page");
    println!("    --verified-url <URL>    Portal past-transactions page");
    println!("    --allow-detail-click    Fall back to the lead detail URL when no buy URL exists");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
}

fn parse_args() -> Result<Args, String> {
    let mut slot_dir = None;
    let mut profile_dir = None;
    let mut recent_url = None;
    let mut verified_url = None;
    let mut allow_detail_click = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-v" => {
                println!("gk-workerd {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--slot-dir" => slot_dir = Some(PathBuf::from(iter.next().ok_or("--slot-dir requires a value")?)),
            "--profile-dir" => profile_dir = Some(iter.next().ok_or("--profile-dir requires a value")?),
            "--recent-url" => recent_url = Some(iter.next().ok_or("--recent-url requires a value")?),
            "--verified-url" => verified_url = Some(iter.next().ok_or("--verified-url requires a value")?),
            "--allow-detail-click" => allow_detail_click = true,
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }

    Ok(Args {
        slot_dir: slot_dir.ok_or("--slot-dir is required")?,
        profile_dir: profile_dir.ok_or("--profile-dir is required")?,
        recent_url: recent_url.ok_or("--recent-url is required")?,
        verified_url: verified_url.ok_or("--verified-url is required")?,
        allow_detail_click,
    })
}

fn setup_logging(paths: &SlotPaths) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Err(e) = gk_storage::rotate_if_oversized(paths) {
        eprintln!("warning: failed to rotate worker log: {e}");
    }

    let Some(parent) = paths.worker_log().parent().map(|p| p.to_path_buf()) else {
        return None;
    };
    let Some(file_name) = paths.worker_log().file_name().map(|n| n.to_os_string()) else {
        return None;
    };
    if std::fs::create_dir_all(&parent).is_err() {
        return None;
    }

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
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("Usage: gk-workerd --slot-dir <DIR> --profile-dir <DIR> --recent-url <URL> --verified-url <URL>");
            std::process::exit(1);
        }
    };

    let paths = SlotPaths::new(args.slot_dir.clone());
    let _log_guard = setup_logging(&paths);

    let Some(slot_id) = paths.slot_id() else {
        error!("slot directory '{}' has no usable final path component", args.slot_dir.display());
        std::process::exit(1);
    };
    let slot_id = SlotId::new(slot_id);

    info!(slot = %slot_id, "gk-workerd starting");

    let writer = FsAtomicWriter;
    let mut slot = gk_storage::read_or_create_state(&writer, &paths, slot_id)?;
    let config = gk_storage::load_config(&paths).unwrap_or_default();

    if config.use_browser {
        warn!("slot_config.use_browser is set but no browser adapter is available in this build; falling back to plain HTTP");
    }

    let clock = gk_core::SystemClock;
    let mut worker_loop: WorkerLoop<NullBrowserAdapter, gk_core::SystemClock> = WorkerLoop::new(
        None,
        reqwest::Client::new(),
        clock,
        paths.clone(),
        args.profile_dir,
        args.recent_url,
        args.verified_url,
        args.allow_detail_click,
        gk_storage::DEFAULT_DEDUP_WINDOW,
    );

    let started = worker_loop.startup(&mut slot).await?;
    if !started {
        info!(slot = %slot.id, "no usable session, exiting in NEEDS_LOGIN");
        return Ok(());
    }

    match worker_loop.run(config, slot).await {
        Ok(final_slot) => {
            info!(
                slot = %final_slot.id,
                status = ?final_slot.status,
                stop_reason = ?final_slot.stop_reason,
                "gk-workerd stopped"
            );
            Ok(())
        }
        Err(e) => {
            error!("worker loop exited with error: {e}");
            Err(e.into())
        }
    }
}

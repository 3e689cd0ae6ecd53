//! Worker startup, heartbeat, and tick loop (spec §4.3 "Lifecycle"),
//! wiring the pure budget/schedule/filter/matching modules and the
//! `pipeline` phase functions into a running process.

use crate::budget::{self, adaptive_sleep};
use crate::dedup::RecentWindow;
use crate::pipeline::{self, PipelineError};
use gk_adapters::BrowserAdapter;
use gk_core::{Clock, Metrics, Phase, Slot, SlotConfig, SlotStatus, StopReason};
use gk_storage::{FsAtomicWriter, MtimeWatch, SlotPaths};
use std::time::Duration;
use thiserror::Error;
use tokio::signal::unix::{signal, SignalKind};

/// `HEARTBEAT_INTERVAL` from spec §4.3 (also the tunable named in §4.2).
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Storage(#[from] gk_storage::StorageError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Session(#[from] gk_adapters::HttpSessionError),
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] std::io::Error),
}

/// Everything the tick loop needs to run one slot's pipeline against a
/// concrete browser adapter and clock.
pub struct WorkerLoop<B: BrowserAdapter, C: Clock> {
    pub browser: Option<B>,
    pub http: reqwest::Client,
    pub clock: C,
    pub paths: SlotPaths,
    pub profile_dir: String,
    pub recent_url: String,
    pub verified_url: String,
    pub allow_detail_click: bool,
    pub dedup: RecentWindow,
    writer: FsAtomicWriter,
    ticks_since_verify: u32,
    session_watch: MtimeWatch,
}

/// Threshold for `periodic_verify`: number of cooldown cycles between
/// verification passes once clicks have accumulated this run.
const PERIODIC_VERIFY_TICKS: u32 = 5;

impl<B: BrowserAdapter, C: Clock> WorkerLoop<B, C> {
    pub fn new(
        browser: Option<B>,
        http: reqwest::Client,
        clock: C,
        paths: SlotPaths,
        profile_dir: String,
        recent_url: String,
        verified_url: String,
        allow_detail_click: bool,
        dedup_capacity: usize,
    ) -> Self {
        Self {
            browser,
            http,
            clock,
            paths,
            profile_dir,
            recent_url,
            verified_url,
            allow_detail_click,
            dedup: RecentWindow::new(dedup_capacity),
            writer: FsAtomicWriter,
            ticks_since_verify: 0,
            session_watch: MtimeWatch::new(),
        }
    }

    /// Rebuilds `self.http` from the current session blob, matching the
    /// cookie-header assembly `startup` performs. A no-op if the blob is
    /// empty or unreadable.
    fn reload_session(&mut self) -> Result<(), LifecycleError> {
        let cookies = gk_storage::load_cookies(&self.paths)?;
        if cookies.is_empty() {
            return Ok(());
        }
        let cookie_header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        self.http = gk_adapters::build_session(Some(&cookie_header))?;
        Ok(())
    }

    /// Startup per spec §4.3: load config, build the session, adopt
    /// cookies, seed budget baselines. Returns `false` (and leaves the
    /// slot in `NEEDS_LOGIN`) if no usable session exists.
    pub async fn startup(&mut self, slot: &mut Slot) -> Result<bool, LifecycleError> {
        let now = self.clock.now();
        let cookies = gk_storage::load_cookies(&self.paths)?;
        if cookies.is_empty() {
            slot.status = SlotStatus::NeedsLogin;
            gk_storage::write_state(&self.writer, &self.paths, slot)?;
            return Ok(false);
        }

        let cookie_header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        self.http = gk_adapters::build_session(Some(&cookie_header))?;
        self.session_watch.check(gk_storage::session_mtime(&self.paths));

        slot.status = SlotStatus::Running;
        slot.started_at = Some(now);
        slot.run_started_at = Some(now);
        slot.run_leads_start = slot.metrics.leads_parsed;
        slot.run_clicked_start = slot.metrics.clicked_total;
        slot.last_heartbeat = Some(now);
        gk_storage::write_state(&self.writer, &self.paths, slot)?;
        Ok(true)
    }

    /// One pass of the pipeline: FETCH_RECENT through WRITE_LEADS, plus an
    /// opportunistic FETCH_VERIFIED/PARSE_VERIFIED pass when
    /// `periodic_verify` earns it. Mutates `slot.metrics` in place.
    pub async fn tick(&mut self, config: &SlotConfig, slot: &mut Slot) -> Result<(), LifecycleError> {
        let now = self.clock.now();
        slot.metrics.set_phase(Phase::FetchRecent, now);

        let html = pipeline::fetch_recent_html(
            self.browser.as_ref(),
            &self.http,
            &self.profile_dir,
            &self.recent_url,
        )
        .await?;
        slot.metrics.pages_fetched += 1;

        slot.metrics.set_phase(Phase::ParseRecent, self.clock.now());
        let (mut accepted, rejected) = pipeline::parse_and_filter(&html, config, &mut self.dedup, now);
        slot.metrics.leads_parsed += accepted.len() as u64;
        slot.metrics.rejected_total += rejected.len() as u64;

        slot.metrics.set_phase(Phase::ClickLeads, self.clock.now());
        let clicked = pipeline::click_leads(
            self.browser.as_ref(),
            &self.http,
            &self.profile_dir,
            &self.recent_url,
            self.allow_detail_click,
            config.dry_run,
            config.click_budget_per_cycle(),
            &mut accepted,
            now,
        )
        .await?;
        slot.metrics.clicked_total += clicked;

        let should_verify = config.periodic_verify
            && self.ticks_since_verify >= PERIODIC_VERIFY_TICKS
            && slot.metrics.clicked_total > slot.run_clicked_start;

        if should_verify {
            if let Some(browser) = self.browser.as_ref() {
                slot.metrics.set_phase(Phase::FetchVerified, self.clock.now());
                tokio::time::sleep(Duration::from_secs(config.verify_after_click_seconds)).await;
                slot.metrics.set_phase(Phase::ParseVerified, self.clock.now());
                let report = pipeline::verify_clicked_leads(
                    browser,
                    &self.profile_dir,
                    &self.verified_url,
                    &mut accepted,
                    self.clock.now(),
                )
                .await?;
                slot.metrics.verified_total += report.verified_keys.len() as u64;
                gk_storage::mark_verified(&self.writer, &self.paths, &report.verified_keys)?;
            }
            self.ticks_since_verify = 0;
        } else {
            self.ticks_since_verify += 1;
        }

        slot.metrics.set_phase(Phase::WriteLeads, self.clock.now());
        pipeline::write_leads(&self.writer, &self.paths, &accepted, &rejected)?;

        slot.metrics.set_phase(Phase::Cooldown, self.clock.now());
        slot.metrics.recompute_error_rate();
        Ok(())
    }

    /// The cooldown between ticks: `cooldown_seconds` if configured, else
    /// the adaptive piecewise function of the current error rate.
    pub fn cooldown(&self, config: &SlotConfig, metrics: &Metrics) -> Duration {
        if config.cooldown_seconds > 0 {
            Duration::from_secs(config.cooldown_seconds)
        } else {
            adaptive_sleep(metrics.error_rate)
        }
    }

    /// Runs the tick loop until a budget trips, the caller's state read
    /// requests a stop, or SIGTERM/SIGINT arrives. Reloads config each
    /// iteration so the hot-reload contract in §4.3 holds.
    pub async fn run(&mut self, initial_config: SlotConfig, mut slot: Slot) -> Result<Slot, LifecycleError> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut config = initial_config;

        loop {
            let now = self.clock.now();
            if let Some(reason) = budget::check_budgets(
                &config,
                now,
                slot.run_started_at,
                slot.metrics.leads_parsed,
                slot.run_leads_start,
            ) {
                slot.mark_stopped(reason, None);
                gk_storage::write_state(&self.writer, &self.paths, &slot)?;
                return Ok(slot);
            }

            // Per spec: an unhandled phase error is recorded and the cycle
            // enters COOLDOWN rather than stopping the slot outright.
            if let Err(err) = self.tick(&config, &mut slot).await {
                slot.metrics.record_error(err.to_string());
                slot.metrics.set_phase(Phase::Cooldown, self.clock.now());
            }
            slot.last_heartbeat = Some(self.clock.now());
            gk_storage::write_state(&self.writer, &self.paths, &slot)?;

            if let Ok(reloaded) = gk_storage::load_config(&self.paths) {
                config = reloaded;
            }

            // Hot-reload the session: a remote login refreshing cookies
            // mid-run must not require a worker restart (spec §4.3).
            if self.session_watch.check(gk_storage::session_mtime(&self.paths)) {
                let _ = self.reload_session();
            }

            let sleep = tokio::time::sleep(self.cooldown(&config, &slot.metrics));
            tokio::select! {
                _ = sleep => {}
                _ = sigterm.recv() => {
                    slot.mark_stopped(StopReason::Manual, Some("sigterm".to_string()));
                    gk_storage::write_state(&self.writer, &self.paths, &slot)?;
                    return Ok(slot);
                }
                _ = sigint.recv() => {
                    slot.mark_stopped(StopReason::Manual, Some("sigint".to_string()));
                    gk_storage::write_state(&self.writer, &self.paths, &slot)?;
                    return Ok(slot);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

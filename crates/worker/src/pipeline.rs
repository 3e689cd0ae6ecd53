//! The phase state machine driving one slot's scrape cycle (spec §4.3):
//! `FETCH_RECENT -> PARSE_RECENT -> CLICK_LEADS -> (FETCH_VERIFIED ->
//! PARSE_VERIFIED)? -> WRITE_LEADS -> COOLDOWN`, generalized from a single
//! linear fetch-one-page loop into the richer filter/dedup/click/verify
//! cycle spec §4.3 describes.

use crate::click;
use crate::dedup::RecentWindow;
use crate::extract;
use crate::filter;
use crate::matching::{self, ClickedIdentity};
use chrono::{DateTime, Utc};
use gk_adapters::html;
use gk_adapters::{BrowserAdapter, BrowserError};
use gk_core::{Lead, LeadStatus, SlotConfig};
use gk_storage::{AtomicWriter, SlotPaths, StorageError};
use std::time::Duration;
use thiserror::Error;

/// Spec §4.3 names the retry count `MAX_RETRIES` without pinning a value.
pub const MAX_RETRIES: u32 = 2;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Browser(#[from] BrowserError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("no recent page could be fetched after {0} attempts")]
    FetchExhausted(u32),
}

/// Backoff between retry attempts: `min(2*attempt, 6)` seconds (spec §4.3).
pub fn retry_backoff(attempt: u32) -> Duration {
    Duration::from_secs((2 * attempt).min(6) as u64)
}

/// Outcome of one FETCH_RECENT -> WRITE_LEADS cycle, folded back into the
/// slot's metrics by the lifecycle driver.
#[derive(Debug, Default)]
pub struct RecentCycleReport {
    pub pages_fetched: u64,
    pub leads_parsed: u64,
    pub clicked: u64,
    pub rejected: u64,
}

/// Outcome of a FETCH_VERIFIED -> PARSE_VERIFIED pass.
#[derive(Debug, Default)]
pub struct VerifyCycleReport {
    pub verified_keys: Vec<String>,
}

/// Fetches `url` via the portal's recent-leads HTML, retrying transient
/// failures per spec §4.3. When `browser` is `Some`, the page is rendered
/// through it (refreshing DOM state); otherwise a plain HTTP GET is used.
pub async fn fetch_recent_html<B: BrowserAdapter>(
    browser: Option<&B>,
    http: &reqwest::Client,
    profile_dir: &str,
    url: &str,
) -> Result<String, PipelineError> {
    async fn http_fetch(http: &reqwest::Client, url: &str) -> Result<String, PipelineError> {
        let response = gk_adapters::http_session::get(http, url).await?;
        Ok(response.text().await?)
    }

    let mut last_err = None;
    for attempt in 1..=MAX_RETRIES {
        let result = match browser {
            Some(b) => b.render_page(profile_dir, url).await.map_err(PipelineError::from),
            None => http_fetch(http, url).await,
        };
        match result {
            Ok(html) => return Ok(html),
            Err(err) => {
                last_err = Some(err);
                tokio::time::sleep(retry_backoff(attempt)).await;
            }
        }
    }
    Err(last_err.unwrap_or(PipelineError::FetchExhausted(MAX_RETRIES)))
}

/// PARSE_RECENT + the filter pipeline: extracts every card, folds it
/// through `filter::evaluate`, and assigns each surviving lead a dedup-safe
/// key via `dedup`. Already-seen keys are silently dropped rather than
/// re-persisted (spec §4.1 dedup window).
pub fn parse_and_filter(
    page_html: &str,
    config: &SlotConfig,
    dedup: &mut RecentWindow,
    now: DateTime<Utc>,
) -> (Vec<Lead>, Vec<Lead>) {
    let doc = html::parse_document(page_html);
    let extracted = extract::extract_recent_leads(&doc);

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for lead in extracted {
        let (key, synthetic) = lead.key();
        if !dedup.insert(&key) {
            continue;
        }

        let rejection = filter::evaluate(config, &lead.candidate);
        let mut record = Lead {
            key,
            lead_id_synthetic: synthetic,
            title: lead.title,
            detail_url: lead.detail_url,
            buy_url: lead.buy_url,
            country: lead.candidate.country,
            country_code: lead.candidate.country_code,
            city: None,
            state: None,
            mobile_available: lead.candidate.mobile_available,
            mobile_verified: lead.candidate.mobile_verified,
            email_available: lead.candidate.email_available,
            email_verified: lead.candidate.email_verified,
            whatsapp_available: lead.candidate.whatsapp_available,
            phone: lead.phone.clone(),
            email: lead.email.clone(),
            member_since: None,
            age_seconds: lead.candidate.age_seconds,
            age_label: None,
            status: LeadStatus::Captured,
            fetched_at: now,
            clicked_at: None,
            verified_at: None,
            rejected_reason: rejection,
            raw_data: serde_json::Map::new(),
        };

        match rejection {
            Some(reason) => {
                record.status = LeadStatus::Rejected;
                record.rejected_reason = Some(reason);
                rejected.push(record);
            }
            None => accepted.push(record),
        }
    }

    (accepted, rejected)
}

/// CLICK_LEADS: attempts to click up to `budget` unique accepted leads,
/// marking each `clicked` on success. In browser mode this re-renders the
/// recent page first (DOM freshness) and resolves each lead's card via the
/// three locate strategies; otherwise it performs a plain HTTP GET against
/// the lead's buy/detail URL and treats HTTP 200 as a click. When `dry_run`
/// is set the rest of the cycle still runs, but no click is attempted.
#[allow(clippy::too_many_arguments)]
pub async fn click_leads<B: BrowserAdapter>(
    browser: Option<&B>,
    http: &reqwest::Client,
    profile_dir: &str,
    recent_url: &str,
    allow_detail_click: bool,
    dry_run: bool,
    budget: u32,
    leads: &mut [Lead],
    now: DateTime<Utc>,
) -> Result<u64, PipelineError> {
    if budget == 0 || dry_run {
        return Ok(0);
    }

    let refreshed = match browser {
        Some(b) => Some(b.render_page(profile_dir, recent_url).await?),
        None => None,
    };
    let doc = refreshed.as_deref().map(html::parse_document);

    let mut clicked = 0u64;
    for lead in leads.iter_mut() {
        if clicked >= budget as u64 {
            break;
        }
        if lead.status != LeadStatus::Captured {
            continue;
        }

        let did_click = if let (Some(b), Some(doc)) = (browser, doc.as_ref()) {
            click_one_via_browser(b, doc, profile_dir, lead).await?
        } else {
            click_one_via_http(http, allow_detail_click, lead).await?
        };

        if did_click {
            lead.mark_clicked(now);
            clicked += 1;
        }
    }

    Ok(clicked)
}

async fn click_one_via_browser<B: BrowserAdapter>(
    browser: &B,
    doc: &scraper::Html,
    profile_dir: &str,
    lead: &Lead,
) -> Result<bool, PipelineError> {
    let selector = if lead.lead_id_synthetic {
        // A top card lacking a portal id may be clicked directly at its
        // position in the list.
        click::click_selector_for_ordinal(0)
    } else {
        let Some(card) = click::locate_card_by_lead_id(doc, &lead.key) else {
            return Ok(false);
        };
        let Some(ordinal) = click::card_ordinal(doc, card) else {
            return Ok(false);
        };
        click::click_selector_for_ordinal(ordinal)
    };

    match browser.click_by_selector(profile_dir, &selector).await {
        Ok(()) => Ok(true),
        Err(BrowserError::SelectorNotFound(_)) => Ok(false),
        Err(other) => Err(other.into()),
    }
}

async fn click_one_via_http(
    http: &reqwest::Client,
    allow_detail_click: bool,
    lead: &Lead,
) -> Result<bool, PipelineError> {
    let url = lead
        .buy_url
        .as_deref()
        .or_else(|| if allow_detail_click { lead.detail_url.as_deref() } else { None });
    let Some(url) = url else { return Ok(false) };
    let response = gk_adapters::http_session::get(http, url).await?;
    Ok(response.status().is_success())
}

/// FETCH_VERIFIED + PARSE_VERIFIED: renders the past-transactions page and
/// matches every clicked lead against the extracted buyer-contact records
/// in the priority order `matching::matches` implements.
pub async fn verify_clicked_leads<B: BrowserAdapter>(
    browser: &B,
    profile_dir: &str,
    verified_url: &str,
    leads: &mut [Lead],
    now: DateTime<Utc>,
) -> Result<VerifyCycleReport, PipelineError> {
    let page = browser.render_page(profile_dir, verified_url).await?;
    let doc = html::parse_document(&page);
    let records = extract::extract_verified_records(&doc);

    let mut report = VerifyCycleReport::default();
    for lead in leads.iter_mut() {
        if lead.status != LeadStatus::Clicked {
            continue;
        }
        let identity = ClickedIdentity {
            lead_id: (!lead.lead_id_synthetic).then(|| lead.key.clone()),
            detail_url: lead.detail_url.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone(),
            title: lead.title.clone(),
        };
        if matching::find_match(&identity, &records).is_some() {
            lead.mark_verified(now);
            report.verified_keys.push(lead.key.clone());
        }
    }
    Ok(report)
}

/// WRITE_LEADS: persists both buffers via the ledger and clears them.
pub fn write_leads(
    writer: &dyn AtomicWriter,
    paths: &SlotPaths,
    accepted: &[Lead],
    rejected: &[Lead],
) -> Result<(), PipelineError> {
    if !accepted.is_empty() {
        gk_storage::append_leads(writer, paths, accepted)?;
    }
    if !rejected.is_empty() {
        gk_storage::append_leads(writer, paths, rejected)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

//! Slot configuration: hot-reloaded, YAML-backed, owned by the control plane.

use serde::{Deserialize, Serialize};

/// Allowed-window schedule restricting when a slot's worker may run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSchedule {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Lowercase three-letter day abbreviations, e.g. `["mon", "tue"]`.
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default = "default_window_start")]
    pub window_start: String,
    #[serde(default = "default_window_end")]
    pub window_end: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_window_start() -> String {
    "00:00".to_string()
}

fn default_window_end() -> String {
    "23:59".to_string()
}

impl Default for ClientSchedule {
    fn default() -> Self {
        Self {
            enabled: false,
            timezone: default_timezone(),
            days: Vec::new(),
            window_start: default_window_start(),
            window_end: default_window_end(),
        }
    }
}

/// Mutable configuration consumed live by the worker with a short refresh
/// cadence (~5s). Every field has a default so a config file that only
/// overrides a handful of options still deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    pub search_terms: Vec<String>,
    pub exclude_terms: Vec<String>,
    pub country: Vec<String>,
    pub client_regions: Vec<String>,

    pub min_member_months: u32,
    pub max_age_hours: u32,
    pub quality_level: u8,

    pub max_clicks_per_run: u32,
    pub max_run_minutes: u32,
    pub max_new_per_cycle: u32,
    pub max_verified_leads_per_cycle: u32,
    /// 0 means "24h effective cap" (see `effective_max_age_seconds`).
    pub max_lead_age_seconds: u64,
    pub zero_second_only: bool,
    pub allow_unknown_age: bool,

    pub require_mobile_available: bool,
    pub require_mobile_verified: bool,
    pub require_email_available: bool,
    pub require_email_verified: bool,
    pub require_whatsapp_available: bool,

    pub client_schedule: ClientSchedule,

    pub use_browser: bool,
    pub headless: bool,
    pub prefer_api: bool,
    pub top_card_only: bool,
    pub top_card_count: u32,
    pub pagination_pages: u32,
    pub render_wait_ms: u64,
    pub recent_wait_ms: u64,
    pub recent_refresh_seconds: u64,
    pub verify_after_click_seconds: u64,
    pub verify_render_wait_ms: u64,
    pub cooldown_seconds: u64,
    pub periodic_verify: bool,
    pub debug_snapshot: bool,

    pub login_mode: bool,
    pub dry_run: bool,
    pub display_name: String,
}

/// 24 hours, in seconds — the effective cap when `max_lead_age_seconds == 0`.
pub const DEFAULT_MAX_AGE_SECONDS: u64 = 24 * 60 * 60;

impl SlotConfig {
    /// `max_lead_age_seconds = 0` means "24h effective cap" per spec §8
    /// boundary behavior.
    pub fn effective_max_age_seconds(&self) -> u64 {
        if self.max_lead_age_seconds == 0 {
            DEFAULT_MAX_AGE_SECONDS
        } else {
            self.max_lead_age_seconds
        }
    }

    /// `max_verified_leads_per_cycle`, falling back to
    /// `max_new_per_cycle` when unset (0), matching the CLICK_LEADS
    /// fallback named in spec §4.3.
    pub fn click_budget_per_cycle(&self) -> u32 {
        if self.max_verified_leads_per_cycle > 0 {
            self.max_verified_leads_per_cycle
        } else {
            self.max_new_per_cycle
        }
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            search_terms: Vec::new(),
            exclude_terms: Vec::new(),
            country: Vec::new(),
            client_regions: Vec::new(),
            min_member_months: 0,
            max_age_hours: 0,
            quality_level: 0,
            max_clicks_per_run: 0,
            max_run_minutes: 0,
            max_new_per_cycle: 0,
            max_verified_leads_per_cycle: 0,
            max_lead_age_seconds: 0,
            zero_second_only: false,
            allow_unknown_age: true,
            require_mobile_available: false,
            require_mobile_verified: false,
            require_email_available: false,
            require_email_verified: false,
            require_whatsapp_available: false,
            client_schedule: ClientSchedule::default(),
            use_browser: true,
            headless: true,
            prefer_api: true,
            top_card_only: false,
            top_card_count: 5,
            pagination_pages: 1,
            render_wait_ms: 1500,
            recent_wait_ms: 1500,
            recent_refresh_seconds: 30,
            verify_after_click_seconds: 3,
            verify_render_wait_ms: 1500,
            cooldown_seconds: 0,
            periodic_verify: false,
            debug_snapshot: false,
            login_mode: false,
            dry_run: false,
            display_name: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Content-addressed lead record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

/// Lifecycle status of a lead, advanced strictly forward
/// (`captured -> clicked -> verified`, or `-> rejected`). See
/// [`crate::testable_properties`] P4: verification is monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Captured,
    Clicked,
    Verified,
    Rejected,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeadStatus::Captured => "captured",
            LeadStatus::Clicked => "clicked",
            LeadStatus::Verified => "verified",
            LeadStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// Why a candidate lead was filtered out before persistence. Ordered to
/// match the filter pipeline's first-match-wins evaluation (see
/// `gk-worker::pipeline::filter`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectedReason {
    KeywordExcluded,
    AgeUnknown,
    AgeTooOld,
    MobileMissing,
    MobileUnverified,
    EmailMissing,
    EmailUnverified,
    WhatsappMissing,
    CountryNotAllowed,
    MemberUnknown,
    MemberTooNew,
    KeywordMiss,
}

impl fmt::Display for RejectedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectedReason::KeywordExcluded => "keyword_excluded",
            RejectedReason::AgeUnknown => "age_unknown",
            RejectedReason::AgeTooOld => "age_too_old",
            RejectedReason::MobileMissing => "mobile_missing",
            RejectedReason::MobileUnverified => "mobile_unverified",
            RejectedReason::EmailMissing => "email_missing",
            RejectedReason::EmailUnverified => "email_unverified",
            RejectedReason::WhatsappMissing => "whatsapp_missing",
            RejectedReason::CountryNotAllowed => "country_not_allowed",
            RejectedReason::MemberUnknown => "member_unknown",
            RejectedReason::MemberTooNew => "member_too_new",
            RejectedReason::KeywordMiss => "keyword_miss",
        };
        write!(f, "{s}")
    }
}

/// Raw fields used to compute a lead's fallback content hash when no portal
/// id is available. Order and field set are fixed — changing them changes
/// every future synthetic key.
#[derive(Debug, Clone, Default)]
pub struct LeadFingerprint<'a> {
    pub title: &'a str,
    pub country: &'a str,
    pub age_seconds: Option<i64>,
    pub detail_url: &'a str,
    pub buyer_details_text: &'a str,
    pub order_details_text: &'a str,
}

/// Computes the stable dedup/identity key for a lead: the portal id if
/// present, else a 16-hex-char content hash (open question 4: marked via
/// [`Lead::lead_id_synthetic`] so callers can tell the two apart).
pub fn lead_key(lead_id: Option<&str>, fingerprint: &LeadFingerprint<'_>) -> (String, bool) {
    if let Some(id) = lead_id.filter(|s| !s.is_empty()) {
        return (id.to_string(), false);
    }
    let mut hasher = Sha256::new();
    hasher.update(fingerprint.title.as_bytes());
    hasher.update(b"\0");
    hasher.update(fingerprint.country.as_bytes());
    hasher.update(b"\0");
    hasher.update(
        fingerprint
            .age_seconds
            .map(|s| s.to_string())
            .unwrap_or_default()
            .as_bytes(),
    );
    hasher.update(b"\0");
    hasher.update(fingerprint.detail_url.as_bytes());
    hasher.update(b"\0");
    hasher.update(fingerprint.buyer_details_text.as_bytes());
    hasher.update(b"\0");
    hasher.update(fingerprint.order_details_text.as_bytes());
    let digest = hasher.finalize();
    let hex = digest.iter().map(|b| format!("{b:02x}")).collect::<String>();
    (format!("hash:{}", &hex[..16]), true)
}

/// Content-addressed record of a single scraped item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Dedup/identity key: portal id, or `hash:<16-hex>`.
    pub key: String,
    /// True when `key` was synthesized from content rather than supplied by
    /// the portal (open question 4 in the design notes).
    #[serde(default)]
    pub lead_id_synthetic: bool,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub mobile_available: bool,
    #[serde(default)]
    pub mobile_verified: bool,
    #[serde(default)]
    pub email_available: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub whatsapp_available: bool,
    /// Raw contact text, populated once the portal reveals it (post-click,
    /// on the past-transactions view) and carried forward for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_label: Option<String>,
    pub status: LeadStatus,
    pub fetched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_reason: Option<RejectedReason>,
    /// Opaque bag of portal-specific fields not otherwise modeled, and the
    /// escape hatch that makes the lead ledger forward-compatible (§4.1
    /// invariant: readers must tolerate unknown keys). Flattened so any
    /// top-level key this struct doesn't name round-trips through it rather
    /// than being dropped on the next write.
    #[serde(flatten)]
    pub raw_data: Map<String, Value>,
}

impl Lead {
    /// Advance this lead to `clicked`, recording the timestamp. A no-op if
    /// already clicked or past clicked (never reverts per P4).
    pub fn mark_clicked(&mut self, now: DateTime<Utc>) {
        if matches!(self.status, LeadStatus::Captured) {
            self.status = LeadStatus::Clicked;
            self.clicked_at = Some(now);
        }
    }

    /// Advance this lead to `verified`. Verification is monotonic: once
    /// verified, further calls are no-ops.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        if !matches!(self.status, LeadStatus::Verified) {
            self.status = LeadStatus::Verified;
            self.verified_at = Some(now);
        }
    }

    fn status_rank(status: LeadStatus) -> u8 {
        match status {
            LeadStatus::Captured => 0,
            LeadStatus::Clicked => 1,
            LeadStatus::Verified => 2,
            LeadStatus::Rejected => 0,
        }
    }

    /// Merge an idempotent re-write of the same key: status only ever moves
    /// forward (captured -> clicked -> verified, or -> rejected from
    /// captured), timestamps are filled in but never cleared, and raw_data
    /// keys from `update` take precedence. This is what makes
    /// `append_leads` idempotent by key (§4.1 contract) and keeps
    /// verification monotonic (P4).
    pub fn apply_update(&mut self, update: &Lead) {
        if update.status == LeadStatus::Rejected && self.status == LeadStatus::Captured {
            self.status = LeadStatus::Rejected;
            self.rejected_reason = update.rejected_reason;
        } else if Self::status_rank(update.status) > Self::status_rank(self.status) {
            self.status = update.status;
        }
        self.clicked_at = self.clicked_at.or(update.clicked_at);
        self.verified_at = self.verified_at.or(update.verified_at);
        for (k, v) in update.raw_data.iter() {
            self.raw_data.insert(k.clone(), v.clone());
        }
        if update.fetched_at > self.fetched_at {
            self.fetched_at = update.fetched_at;
        }
    }
}

#[cfg(test)]
#[path = "lead_tests.rs"]
mod tests;

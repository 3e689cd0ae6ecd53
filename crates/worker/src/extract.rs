//! Turns rendered/fetched HTML into the candidate and verification records
//! the pure pipeline modules (`filter`, `matching`) operate on.

use crate::filter::CandidateLead;
use crate::matching::VerifiedRecord;
use crate::portal_markup as pm;
use gk_adapters::html;
use gk_core::{lead_key, LeadFingerprint};
use scraper::{ElementRef, Html};

fn attr_bool(card: ElementRef<'_>, name: &str) -> bool {
    card.value().attr(name).is_some_and(|v| v == "true" || v == "1")
}

fn attr_i64(card: ElementRef<'_>, name: &str) -> Option<i64> {
    card.value().attr(name).and_then(|v| v.parse().ok())
}

fn attr_string(card: ElementRef<'_>, name: &str) -> Option<String> {
    card.value().attr(name).map(str::to_string)
}

/// One card extracted from the recent-leads page, carrying both the fields
/// `filter::evaluate` needs and the identifying fields the pipeline later
/// persists or uses to compute a dedup key.
#[derive(Debug, Clone)]
pub struct ExtractedLead {
    pub rank: usize,
    pub lead_id: Option<String>,
    pub title: String,
    pub detail_url: Option<String>,
    pub buy_url: Option<String>,
    /// Present only when the portal reveals contact details on the recent
    /// card itself, rather than gating them behind a click.
    pub phone: Option<String>,
    pub email: Option<String>,
    pub candidate: CandidateLead,
}

impl ExtractedLead {
    /// The stable dedup/identity key for this lead (§4.1: portal id, else a
    /// content hash over the fixed fingerprint field set).
    pub fn key(&self) -> (String, bool) {
        lead_key(
            self.lead_id.as_deref(),
            &LeadFingerprint {
                title: &self.title,
                country: self.candidate.country.as_deref().unwrap_or(""),
                age_seconds: self.candidate.age_seconds,
                detail_url: self.detail_url.as_deref().unwrap_or(""),
                buyer_details_text: "",
                order_details_text: "",
            },
        )
    }
}

/// Extracts every card on the recent-leads page, in document order, tagging
/// each with its rank for "guaranteed observation" logging of top cards.
pub fn extract_recent_leads(doc: &Html) -> Vec<ExtractedLead> {
    html::cards(doc, pm::CARD_SELECTOR)
        .into_iter()
        .enumerate()
        .map(|(rank, card)| extract_one(rank, card))
        .collect()
}

fn extract_one(rank: usize, card: ElementRef<'_>) -> ExtractedLead {
    let title = html::select_first_text(
        &Html::parse_fragment(&card.html()),
        pm::TITLE_SELECTOR,
    )
    .unwrap_or_default();

    ExtractedLead {
        rank,
        lead_id: attr_string(card, pm::ATTR_LEAD_ID),
        title: title.clone(),
        detail_url: attr_string(card, pm::ATTR_DETAIL_URL),
        buy_url: attr_string(card, pm::ATTR_BUY_URL),
        phone: attr_string(card, pm::ATTR_PHONE),
        email: attr_string(card, pm::ATTR_EMAIL),
        candidate: CandidateLead {
            title,
            country: attr_string(card, pm::ATTR_COUNTRY),
            country_code: attr_string(card, pm::ATTR_COUNTRY_CODE),
            age_seconds: attr_i64(card, pm::ATTR_AGE_SECONDS),
            member_since_months: attr_i64(card, pm::ATTR_MEMBER_MONTHS),
            mobile_available: attr_bool(card, pm::ATTR_MOBILE_AVAILABLE),
            mobile_verified: attr_bool(card, pm::ATTR_MOBILE_VERIFIED),
            email_available: attr_bool(card, pm::ATTR_EMAIL_AVAILABLE),
            email_verified: attr_bool(card, pm::ATTR_EMAIL_VERIFIED),
            whatsapp_available: attr_bool(card, pm::ATTR_WHATSAPP_AVAILABLE),
        },
    }
}

/// Extracts the buyer-contact records from a rendered "past transactions"
/// page for the verification match against clicked leads.
pub fn extract_verified_records(doc: &Html) -> Vec<VerifiedRecord> {
    html::cards(doc, pm::BUYER_CONTACT_CARD_SELECTOR)
        .into_iter()
        .map(|card| {
            let fragment = Html::parse_fragment(&card.html());
            VerifiedRecord {
                lead_id: attr_string(card, pm::ATTR_LEAD_ID),
                url: attr_string(card, pm::ATTR_LEAD_URL),
                phone: html::select_first_text(&fragment, pm::PHONE_SELECTOR),
                email: html::select_first_text(&fragment, pm::EMAIL_SELECTOR),
                title: html::select_first_text(&fragment, pm::PURCHASED_TITLE_SELECTOR),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;

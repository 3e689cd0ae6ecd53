//! Pure lead-filtering logic (spec §4.3 "Filtering"), kept free of any I/O
//! so the ordered-rejection rules and country/age boundary behaviors are
//! unit- and property-testable without a browser or HTTP fake.

use gk_core::{RejectedReason, SlotConfig};

/// The subset of a candidate lead's fields the filters need to see. Built
/// by the parse stage from either the API payload or the rendered DOM.
#[derive(Debug, Clone, Default)]
pub struct CandidateLead {
    pub title: String,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub age_seconds: Option<i64>,
    pub member_since_months: Option<i64>,
    pub mobile_available: bool,
    pub mobile_verified: bool,
    pub email_available: bool,
    pub email_verified: bool,
    pub whatsapp_available: bool,
}

/// Applies the six ordered filter rules from spec §4.3. Returns `None` if
/// the lead is accepted, `Some(reason)` for the *first* matching rejection.
pub fn evaluate(config: &SlotConfig, lead: &CandidateLead) -> Option<RejectedReason> {
    // 1. Exclude-term hit in title.
    let title_lower = lead.title.to_lowercase();
    if config
        .exclude_terms
        .iter()
        .any(|term| !term.is_empty() && title_lower.contains(&term.to_lowercase()))
    {
        return Some(RejectedReason::KeywordExcluded);
    }

    // 2. Age.
    if config.zero_second_only {
        if lead.age_seconds != Some(0) {
            return Some(RejectedReason::AgeTooOld);
        }
    } else {
        match lead.age_seconds {
            None if !config.allow_unknown_age => return Some(RejectedReason::AgeUnknown),
            Some(age) if age as u64 > config.effective_max_age_seconds() => {
                return Some(RejectedReason::AgeTooOld)
            }
            _ => {}
        }
    }

    // 3. Capability requirements.
    if config.require_mobile_available && !lead.mobile_available {
        return Some(RejectedReason::MobileMissing);
    }
    if config.require_mobile_verified && !lead.mobile_verified {
        return Some(RejectedReason::MobileUnverified);
    }
    if config.require_email_available && !lead.email_available {
        return Some(RejectedReason::EmailMissing);
    }
    if config.require_email_verified && !lead.email_verified {
        return Some(RejectedReason::EmailUnverified);
    }
    if config.require_whatsapp_available && !lead.whatsapp_available {
        return Some(RejectedReason::WhatsappMissing);
    }

    // 4. Country.
    let allowed: Vec<&str> = config
        .country
        .iter()
        .chain(config.client_regions.iter())
        .map(String::as_str)
        .collect();
    if !allowed.is_empty() && !country_allowed(&allowed, lead.country_code.as_deref(), lead.country.as_deref())
    {
        return Some(RejectedReason::CountryNotAllowed);
    }

    // 5. Member tenure / quality caps.
    if config.min_member_months > 0 {
        match lead.member_since_months {
            None => return Some(RejectedReason::MemberUnknown),
            Some(months) if months < config.min_member_months as i64 => {
                return Some(RejectedReason::MemberTooNew)
            }
            _ => {}
        }
    }
    if config.max_age_hours > 0 {
        if let Some(age) = lead.age_seconds {
            if age > (config.max_age_hours as i64) * 3600 {
                return Some(RejectedReason::AgeTooOld);
            }
        }
    }

    // 6. Search-term miss.
    let has_search_terms = config.search_terms.iter().any(|t| !t.is_empty());
    if has_search_terms
        && !config
            .search_terms
            .iter()
            .any(|term| !term.is_empty() && title_lower.contains(&term.to_lowercase()))
    {
        return Some(RejectedReason::KeywordMiss);
    }

    None
}

/// Country matching per spec §8 boundary behavior: exact country_code
/// match; short tokens (≤3 chars) require a whole-token match after
/// splitting the country name on non-word characters; longer tokens may
/// substring-match.
fn country_allowed(allowed: &[&str], country_code: Option<&str>, country: Option<&str>) -> bool {
    if let (Some(code), true) = (country_code, !allowed.is_empty()) {
        if allowed.iter().any(|a| a.eq_ignore_ascii_case(code)) {
            return true;
        }
    }

    let Some(country) = country else { return false };
    let country_lower = country.to_lowercase();
    let tokens: Vec<&str> = country_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect();

    allowed.iter().any(|candidate| {
        let candidate_lower = candidate.to_lowercase();
        if candidate_lower.chars().count() <= 3 {
            tokens.iter().any(|t| *t == candidate_lower)
        } else {
            country_lower.contains(&candidate_lower)
        }
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

//! Verification matching (spec §4.3 "Verification"): after clicking leads,
//! the worker fetches the portal's "past transactions" view and matches
//! clicked leads against it in a fixed priority order.

/// One row extracted from the past-transactions view.
#[derive(Debug, Clone, Default)]
pub struct VerifiedRecord {
    pub lead_id: Option<String>,
    pub url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

/// The subset of a clicked lead's identity fields needed to match it
/// against a [`VerifiedRecord`].
#[derive(Debug, Clone, Default)]
pub struct ClickedIdentity {
    pub lead_id: Option<String>,
    pub detail_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub title: String,
}

/// Keeps only trailing digits, then the last 10 of those — tolerant of
/// country codes, spaces, and punctuation in either source.
fn last_ten_digits(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 10 {
        return None;
    }
    Some(digits[digits.len() - 10..].to_string())
}

fn normalize_title(title: &str) -> String {
    title.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True if `record` matches `clicked` under the priority order in spec
/// §4.3: lead_id equality, then url equality, then last-10-digit phone
/// equality, then email equality, then normalized-title exact-or-substring
/// (only once the normalized title is at least 8 characters, to avoid
/// over-eager substring hits on short titles).
pub fn matches(clicked: &ClickedIdentity, record: &VerifiedRecord) -> bool {
    if let (Some(a), Some(b)) = (&clicked.lead_id, &record.lead_id) {
        if a == b {
            return true;
        }
    }
    if let (Some(a), Some(b)) = (&clicked.detail_url, &record.url) {
        if a == b {
            return true;
        }
    }
    if let (Some(a), Some(b)) = (&clicked.phone, &record.phone) {
        if let (Some(a10), Some(b10)) = (last_ten_digits(a), last_ten_digits(b)) {
            if a10 == b10 {
                return true;
            }
        }
    }
    if let (Some(a), Some(b)) = (&clicked.email, &record.email) {
        if a.eq_ignore_ascii_case(b) {
            return true;
        }
    }
    if let Some(record_title) = &record.title {
        let a = normalize_title(&clicked.title);
        let b = normalize_title(record_title);
        if a.len() >= 8 && b.len() >= 8 && (a == b || b.contains(&a) || a.contains(&b)) {
            return true;
        }
    }
    false
}

/// Finds the first verified record (in priority order per field, not per
/// record) matching `clicked`, if any.
pub fn find_match<'a>(
    clicked: &ClickedIdentity,
    records: &'a [VerifiedRecord],
) -> Option<&'a VerifiedRecord> {
    records.iter().find(|record| matches(clicked, record))
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;

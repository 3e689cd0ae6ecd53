//! Session cookie blob (`session.enc`): a JSON list of cookie objects,
//! multi-reader/single-writer, hot-reloaded by the worker via mtime.

use crate::atomic::{write_atomic, AtomicWriter};
use crate::error::StorageError;
use crate::paths::SlotPaths;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "httpOnly")]
    pub http_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
}

/// Accepts either the canonical `[{...}, ...]` shape or a bare `{name:
/// value}` map, matching `_load_cookies`'s tolerance for both historical
/// session-blob shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum SessionBlobShape {
    List(Vec<Cookie>),
    Map(std::collections::HashMap<String, String>),
}

/// Reads the session blob. An absent or empty file yields an empty list —
/// the worker interprets that as "no session" and transitions to
/// `NEEDS_LOGIN` (§4.3 Startup).
pub fn load_cookies(paths: &SlotPaths) -> Result<Vec<Cookie>, StorageError> {
    let path = paths.session_file();
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let shape: SessionBlobShape = match serde_json::from_str(&contents) {
        Ok(shape) => shape,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session blob is not valid JSON, treating as absent");
            return Ok(Vec::new());
        }
    };
    Ok(match shape {
        SessionBlobShape::List(cookies) => cookies,
        SessionBlobShape::Map(pairs) => pairs
            .into_iter()
            .map(|(name, value)| Cookie {
                name,
                value,
                domain: None,
                path: None,
                secure: None,
                http_only: None,
                expires: None,
            })
            .collect(),
    })
}

pub fn write_cookies(writer: &dyn AtomicWriter, paths: &SlotPaths, cookies: &[Cookie]) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(cookies)?;
    write_atomic(writer, &paths.session_file(), &bytes)
}

pub fn session_mtime(paths: &SlotPaths) -> Option<std::time::SystemTime> {
    std::fs::metadata(paths.session_file()).and_then(|m| m.modified()).ok()
}

/// Filters an exported browser-profile cookie jar down to the cookies
/// relevant to `domain_fragment` (matched against `name` or `domain`,
/// case-insensitively). Falls back to the unfiltered list if the filter
/// would otherwise yield nothing, since an overly strict domain match is
/// worse than an unfiltered session.
pub fn filter_cookies_for_domain(cookies: Vec<Cookie>, domain_fragment: &str) -> Vec<Cookie> {
    let needle = domain_fragment.to_lowercase();
    let filtered: Vec<Cookie> = cookies
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.domain
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .cloned()
        .collect();
    if filtered.is_empty() {
        cookies
    } else {
        filtered
    }
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;

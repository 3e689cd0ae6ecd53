//! Browser automation as an opaque capability (spec §9 design note). The
//! engine itself is out of scope (§1 "Out of scope") — this crate only
//! defines the boundary `{ render_page, evaluate_script, click_by_selector,
//! export_cookies, new_screencast }` so the pipeline can run against a
//! scriptable fake in tests.

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BrowserCall, FakeBrowserAdapter, ScriptedPage};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Default timeout for a browser operation (spec §5 "browser operations
/// have a default 12s timeout").
pub const BROWSER_OP_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("navigation failed: {0}")]
    NavigationFailed(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("script evaluation failed: {0}")]
    EvalFailed(String),
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

/// A single exported cookie, shared with `gk_storage::Cookie`'s shape so
/// the adapter output can be written straight to the session blob.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
}

#[async_trait]
pub trait BrowserAdapter: Clone + Send + Sync + 'static {
    /// Navigate to `url` using the given profile directory (one profile
    /// per slot, exclusive — spec §5 invariant), returning the rendered
    /// HTML once the page has settled.
    async fn render_page(&self, profile_dir: &str, url: &str) -> Result<String, BrowserError>;

    /// Evaluate `script` against the current page and return its string
    /// result.
    async fn evaluate_script(&self, profile_dir: &str, script: &str) -> Result<String, BrowserError>;

    /// Click the element matching `selector` on the current page.
    async fn click_by_selector(&self, profile_dir: &str, selector: &str) -> Result<(), BrowserError>;

    /// Export the profile's current cookie jar.
    async fn export_cookies(&self, profile_dir: &str) -> Result<Vec<ExportedCookie>, BrowserError>;

    /// Open a screencast stream for remote-login assistance (§6 WebSocket
    /// screencast contract); returns an opaque session handle.
    async fn new_screencast(&self, profile_dir: &str) -> Result<String, BrowserError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

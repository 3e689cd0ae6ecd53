//! Scriptable fake browser adapter. Tests preload pages/scripts/clicks by
//! profile+url/selector and then drive the worker pipeline against it,
//! following the same recorded-calls pattern as
//! `adapters::session::fake::FakeSessionAdapter`.

use super::{BrowserAdapter, BrowserError, ExportedCookie};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum BrowserCall {
    RenderPage { profile_dir: String, url: String },
    EvaluateScript { profile_dir: String, script: String },
    ClickBySelector { profile_dir: String, selector: String },
    ExportCookies { profile_dir: String },
    NewScreencast { profile_dir: String },
}

/// A scripted page: the HTML to return for `render_page`, plus which
/// selectors are clickable.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPage {
    pub html: String,
    pub clickable_selectors: Vec<String>,
}

struct FakeBrowserState {
    pages: HashMap<(String, String), ScriptedPage>,
    scripts: HashMap<String, String>,
    cookies: HashMap<String, Vec<ExportedCookie>>,
    calls: Vec<BrowserCall>,
    next_screencast_id: u64,
}

#[derive(Clone)]
pub struct FakeBrowserAdapter {
    inner: Arc<Mutex<FakeBrowserState>>,
}

impl Default for FakeBrowserAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeBrowserState {
                pages: HashMap::new(),
                scripts: HashMap::new(),
                cookies: HashMap::new(),
                calls: Vec::new(),
                next_screencast_id: 0,
            })),
        }
    }
}

impl FakeBrowserAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BrowserCall> {
        self.inner.lock().calls.clone()
    }

    pub fn set_page(&self, profile_dir: &str, url: &str, page: ScriptedPage) {
        self.inner
            .lock()
            .pages
            .insert((profile_dir.to_string(), url.to_string()), page);
    }

    pub fn set_script_result(&self, script: &str, result: &str) {
        self.inner
            .lock()
            .scripts
            .insert(script.to_string(), result.to_string());
    }

    pub fn set_cookies(&self, profile_dir: &str, cookies: Vec<ExportedCookie>) {
        self.inner
            .lock()
            .cookies
            .insert(profile_dir.to_string(), cookies);
    }
}

#[async_trait]
impl BrowserAdapter for FakeBrowserAdapter {
    async fn render_page(&self, profile_dir: &str, url: &str) -> Result<String, BrowserError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BrowserCall::RenderPage {
            profile_dir: profile_dir.to_string(),
            url: url.to_string(),
        });
        inner
            .pages
            .get(&(profile_dir.to_string(), url.to_string()))
            .map(|p| p.html.clone())
            .ok_or_else(|| BrowserError::NavigationFailed(url.to_string()))
    }

    async fn evaluate_script(
        &self,
        profile_dir: &str,
        script: &str,
    ) -> Result<String, BrowserError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BrowserCall::EvaluateScript {
            profile_dir: profile_dir.to_string(),
            script: script.to_string(),
        });
        Ok(inner.scripts.get(script).cloned().unwrap_or_default())
    }

    async fn click_by_selector(
        &self,
        profile_dir: &str,
        selector: &str,
    ) -> Result<(), BrowserError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BrowserCall::ClickBySelector {
            profile_dir: profile_dir.to_string(),
            selector: selector.to_string(),
        });
        let clickable = inner
            .pages
            .values()
            .any(|p| p.clickable_selectors.iter().any(|s| s == selector));
        if clickable {
            Ok(())
        } else {
            Err(BrowserError::SelectorNotFound(selector.to_string()))
        }
    }

    async fn export_cookies(&self, profile_dir: &str) -> Result<Vec<ExportedCookie>, BrowserError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BrowserCall::ExportCookies {
            profile_dir: profile_dir.to_string(),
        });
        Ok(inner.cookies.get(profile_dir).cloned().unwrap_or_default())
    }

    async fn new_screencast(&self, profile_dir: &str) -> Result<String, BrowserError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BrowserCall::NewScreencast {
            profile_dir: profile_dir.to_string(),
        });
        inner.next_screencast_id += 1;
        Ok(format!("screencast-{}", inner.next_screencast_id))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

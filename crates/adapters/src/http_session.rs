//! Portal HTTP session wrapper: a `reqwest::Client` carrying the session
//! cookie jar, rebuilt whenever the session blob's mtime advances.

use gk_core::ErrorCategory;
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/122.0.0.0 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Matches spec §5's explicit connect/read timeouts for HTTP calls.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const READ_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum HttpSessionError {
    #[error("building http client: {0}")]
    Build(#[from] reqwest::Error),
}

impl HttpSessionError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::TransientIo
    }
}

/// Builds a `reqwest::Client` with the portal's expected browser headers
/// and an initial cookie jar populated from the session blob.
///
/// A fresh client is built rather than mutated in place: `reqwest`'s cookie
/// store has no supported way to bulk-replace cookies after construction,
/// so a hot-reloaded session blob produces a brand new client.
pub fn build_session(cookie_header: Option<&str>) -> Result<Client, HttpSessionError> {
    let jar = std::sync::Arc::new(reqwest::cookie::Jar::default());
    if let Some(cookies) = cookie_header {
        if let Ok(url) = "https://www.indiamart.com".parse() {
            jar.add_cookie_str(cookies, &url);
        }
    }

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(READ_TIMEOUT)
        .cookie_provider(jar)
        .build()?;
    Ok(client)
}

fn default_headers() -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static(ACCEPT),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        reqwest::header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers
}

/// Fetches `url`, attaching the portal's expected `Accept`/`Accept-Language`
/// headers on top of whatever the session client already carries.
pub async fn get(client: &Client, url: &str) -> Result<Response, reqwest::Error> {
    client.get(url).headers(default_headers()).send().await
}

#[cfg(test)]
#[path = "http_session_tests.rs"]
mod tests;

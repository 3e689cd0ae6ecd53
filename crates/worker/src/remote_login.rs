//! Remote-login session registry + reaper (supplemented feature; spec §6
//! names the contract: open a persistent browser profile, let a human
//! confirm the dashboard loaded, export cookies back into the session
//! blob). A worker hands off to this registry instead of guessing
//! credentials itself (spec §4.3 "Login/session
//! handling").

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use gk_adapters::{BrowserAdapter, BrowserError};
use gk_core::{IdGen, RemoteLoginSessionId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Default absolute expiry for an unfinished remote-login session, unless
/// overridden by `REMOTE_LOGIN_TIMEOUT_MINUTES`.
pub const DEFAULT_TIMEOUT_MINUTES: i64 = 10;

#[derive(Debug, Error)]
pub enum RemoteLoginError {
    #[error("session {0} not found")]
    NotFound(RemoteLoginSessionId),
    #[error("session {0} has expired")]
    Expired(RemoteLoginSessionId),
    #[error(transparent)]
    Browser(#[from] BrowserError),
}

#[derive(Debug, Clone)]
pub struct RemoteLoginSession {
    pub id: RemoteLoginSessionId,
    pub slot_id: String,
    pub profile_dir: String,
    pub screencast_handle: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl RemoteLoginSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-memory registry of in-flight remote-login sessions for this node.
/// One process-wide instance is shared between the control plane's HTTP
/// handlers and the background reaper task.
#[derive(Clone, Default)]
pub struct RemoteLoginRegistry {
    sessions: Arc<Mutex<HashMap<RemoteLoginSessionId, RemoteLoginSession>>>,
}

impl RemoteLoginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new remote-login session: opens a screencast against the
    /// slot's persistent profile and registers it with an absolute expiry.
    pub async fn start<B: BrowserAdapter, G: IdGen>(
        &self,
        browser: &B,
        ids: &G,
        slot_id: &str,
        profile_dir: &str,
        now: DateTime<Utc>,
        timeout_minutes: i64,
    ) -> Result<RemoteLoginSession, RemoteLoginError> {
        let screencast_handle = browser.new_screencast(profile_dir).await?;
        let session = RemoteLoginSession {
            id: RemoteLoginSessionId::new(ids.next()),
            slot_id: slot_id.to_string(),
            profile_dir: profile_dir.to_string(),
            screencast_handle,
            started_at: now,
            expires_at: now + ChronoDuration::minutes(timeout_minutes),
        };
        self.sessions
            .lock()
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    pub fn get(&self, id: &RemoteLoginSessionId) -> Option<RemoteLoginSession> {
        self.sessions.lock().get(id).cloned()
    }

    /// Confirms the login succeeded and exports the resulting cookie jar,
    /// removing the session from the registry either way.
    pub async fn finish<B: BrowserAdapter>(
        &self,
        browser: &B,
        id: &RemoteLoginSessionId,
        now: DateTime<Utc>,
    ) -> Result<Vec<gk_adapters::ExportedCookie>, RemoteLoginError> {
        let session = {
            let mut sessions = self.sessions.lock();
            sessions.remove(id).ok_or_else(|| RemoteLoginError::NotFound(id.clone()))?
        };
        if session.is_expired(now) {
            return Err(RemoteLoginError::Expired(id.clone()));
        }
        Ok(browser.export_cookies(&session.profile_dir).await?)
    }

    /// Drops every session whose absolute expiry has passed. Returns the
    /// ids that were reaped, so the caller can log them.
    pub fn reap_expired(&self, now: DateTime<Utc>) -> Vec<RemoteLoginSessionId> {
        let mut sessions = self.sessions.lock();
        let expired: Vec<RemoteLoginSessionId> = sessions
            .values()
            .filter(|s| s.is_expired(now))
            .map(|s| s.id.clone())
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        expired
    }

    pub fn active_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

#[cfg(test)]
#[path = "remote_login_tests.rs"]
mod tests;

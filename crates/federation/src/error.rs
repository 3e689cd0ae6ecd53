//! Federation error taxonomy, mapping onto spec §7's `UpstreamHttp` /
//! `AuthRequired` / `ConfigInvalid` categories the way `gk_storage::StorageError`
//! maps onto `TransientIo`/`ConfigInvalid`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FederationError {
    #[error("token is invalid or expired: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("not authorized for this slot")]
    Unauthorized,
    #[error("node '{0}' is not registered")]
    UnknownNode(String),
    #[error("node '{0}' has no base_url configured")]
    NodeNotRemote(String),
    #[error("upstream request failed: {0}")]
    BadGateway(String),
    #[error(transparent)]
    Storage(#[from] gk_storage::StorageError),
}

impl FederationError {
    pub fn category(&self) -> gk_core::ErrorCategory {
        match self {
            FederationError::InvalidToken(_) | FederationError::Unauthorized => {
                gk_core::ErrorCategory::AuthRequired
            }
            FederationError::UnknownNode(_) | FederationError::NodeNotRemote(_) => {
                gk_core::ErrorCategory::ConfigInvalid
            }
            FederationError::BadGateway(_) => gk_core::ErrorCategory::UpstreamHttp,
            FederationError::Storage(e) => e.category(),
        }
    }
}

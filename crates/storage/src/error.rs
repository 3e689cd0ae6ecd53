//! Storage error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("corrupt document at {path}: {detail}")]
    Corrupt { path: String, detail: String },
}

impl StorageError {
    pub fn category(&self) -> gk_core::ErrorCategory {
        match self {
            StorageError::Io(_) => gk_core::ErrorCategory::TransientIo,
            StorageError::Json(_) | StorageError::Yaml(_) | StorageError::Corrupt { .. } => {
                gk_core::ErrorCategory::ConfigInvalid
            }
        }
    }
}

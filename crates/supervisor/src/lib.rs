#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The Slot Supervisor (§4.2): a reconciliation loop that brings each slot's
//! OS-level reality (pid, liveness) in line with its declared intent
//! (`command`, `mode`), running independently of any particular worker
//! implementation.

pub mod env;
pub mod lock;
pub mod reconcile;

pub use lock::SupervisorLock;
pub use reconcile::{reconcile_slot, ReconcileOutcome, WorkerSpawnConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("could not determine a state directory (HOME is unset)")]
    NoStateDir,
    #[error("another supervisor instance already holds the lock: {0}")]
    AlreadyRunning(#[source] std::io::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] gk_storage::StorageError),
    #[error(transparent)]
    Process(#[from] gk_adapters::process::ProcessError),
}

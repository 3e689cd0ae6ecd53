#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable Slot State Store (§4.1): atomic document I/O for the state
//! document, slot config, session cookie blob, lead ledger, debug
//! snapshots, worker log rotation, and the federation node registry.

pub mod atomic;
pub mod config_store;
pub mod debug_snapshot;
pub mod error;
pub mod lead_ledger;
pub mod log_rotation;
pub mod node_registry;
pub mod paths;
pub mod session_store;
pub mod state_store;

pub use atomic::{write_atomic, AtomicWriter, FsAtomicWriter};
pub use config_store::{config_mtime, load_config, write_config, MtimeWatch};
pub use error::StorageError;
pub use lead_ledger::{append_leads, existing_lead_keys, mark_verified, DEFAULT_DEDUP_WINDOW};
pub use log_rotation::{rotate_if_oversized, MAX_LOG_BYTES};
pub use node_registry::load_node_registry;
pub use paths::{list_slot_dirs, SlotPaths};
pub use session_store::{filter_cookies_for_domain, load_cookies, session_mtime, write_cookies, Cookie};
pub use state_store::{path_for, read_or_create_state, read_state, write_state};

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The Worker Runtime and Scraping Pipeline State Machine (§4.3): one
//! process per slot, driving FETCH_RECENT through WRITE_LEADS/COOLDOWN
//! against a capability-gated browser/HTTP boundary.

pub mod budget;
pub mod click;
pub mod dedup;
pub mod extract;
pub mod filter;
pub mod lifecycle;
pub mod matching;
pub mod pipeline;
pub mod portal_markup;
pub mod remote_login;
pub mod schedule;

pub use lifecycle::{LifecycleError, WorkerLoop, HEARTBEAT_INTERVAL};
pub use pipeline::PipelineError;

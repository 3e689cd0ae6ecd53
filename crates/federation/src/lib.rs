#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The Cluster Federation Router (spec §4.4): bearer-token authorization
//! plus a dispatch helper that resolves a node id to a local or remote
//! target and forwards control-plane operations across nodes.

pub mod auth;
pub mod dispatch;
pub mod error;

pub use auth::{authorize_slot, mint_token, outbound_token, verify_token, Claims, Role};
pub use dispatch::{DispatchTarget, Dispatcher, ForwardedResponse, UPSTREAM_TIMEOUT};
pub use error::FederationError;

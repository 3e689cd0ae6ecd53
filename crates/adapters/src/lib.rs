#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: process lifecycle, browser automation
//! (opaque capability), the portal HTTP session, and HTML parsing.

pub mod browser;
pub mod html;
pub mod http_session;
pub mod process;

pub use browser::{BrowserAdapter, BrowserError, ExportedCookie, BROWSER_OP_TIMEOUT};
pub use http_session::{build_session, get, HttpSessionError};
pub use process::{OsProcessAdapter, ProcessAdapter, ProcessError, TERM_GRACE};

#[cfg(any(test, feature = "test-support"))]
pub use browser::{BrowserCall, FakeBrowserAdapter, ScriptedPage};
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcessAdapter, ProcessCall};

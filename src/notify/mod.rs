//! Push notification dispatch.
//!
//! A thin provider layer over the ServerChan relay. The `Notifier` trait is
//! the seam the workflow talks to; delivery failures are folded into the
//! returned result so a push can never abort a run.

pub mod provider;
pub mod serverchan;

pub use provider::{NotificationResult, Notifier};
pub use serverchan::{resolve_endpoint, ServerChanProvider};

//! Abstraction over the live browser page.
//!
//! The workflow drives the page exclusively through this trait so it can be
//! exercised against a scripted fake without a Chrome process.

use crate::error::AppResult;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Operations the sign-in workflow performs against a page
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigates to the URL and awaits the load event
    async fn goto(&self, url: &str) -> AppResult<()>;

    /// Polls for the element until it exists or the timeout elapses
    ///
    /// # Returns
    /// `ElementWaitTimeout` when the deadline passes without a match
    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> AppResult<()>;

    /// Finds the element and types the text into it
    async fn type_into(&self, selector: &str, text: &str) -> AppResult<()>;

    /// Finds the element and clicks it
    async fn click(&self, selector: &str) -> AppResult<()>;

    /// Captures a full-page PNG screenshot to the path
    async fn screenshot(&self, path: &Path) -> AppResult<()>;

    /// Tears the session down, releasing the browser process
    ///
    /// Safe to call more than once; failures are logged and swallowed.
    async fn close(&mut self);
}

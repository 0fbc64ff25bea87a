//! Core notification provider trait and types.
//!
//! This module provides the abstraction for notification providers,
//! allowing easy extension to support different push channels.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of a notification send attempt
///
/// `send` always produces one of these instead of an error so a failed
/// push can never abort the run that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether the relay accepted the message
    pub succeeded: bool,
    /// Relay status code (`0` on success, `-1` for transport or parse failures)
    pub code: i64,
    /// Relay message text or a local failure description
    pub message: String,
}

/// Trait for notification providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct WebhookProvider {
///     endpoint: String,
/// }
///
/// #[async_trait]
/// impl Notifier for WebhookProvider {
///     async fn send(
///         &self,
///         title: &str,
///         body: &str,
///         extras: &HashMap<String, String>,
///     ) -> NotificationResult {
///         // Implementation here
///     }
///
///     fn name(&self) -> &'static str {
///         "webhook"
///     }
/// }
/// ```
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a notification message
    ///
    /// # Arguments
    /// * `title` - Message title/subject
    /// * `body` - Message body text
    /// * `extras` - Provider-specific options merged into the request
    ///
    /// # Returns
    /// The send outcome. Delivery failures are reported through the result,
    /// never as an error, so callers log it and move on.
    async fn send(
        &self,
        title: &str,
        body: &str,
        extras: &HashMap<String, String>,
    ) -> NotificationResult;

    /// Returns the provider name for logging/debugging
    ///
    /// # Returns
    /// Static string identifying the provider (e.g., "serverchan")
    fn name(&self) -> &'static str;
}

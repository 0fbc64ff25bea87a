//! Notify command handler
//!
//! Handles the notify command for sending a test notification through the
//! configured relay.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::notify::{Notifier, ServerChanProvider, resolve_endpoint};

/// Title used when the notify command is given none
const DEFAULT_TITLE: &str = "qiandao-rs test";

/// Handler for the notify command
pub struct NotifyCommandHandler {
    config: Settings,
}

impl NotifyCommandHandler {
    /// Create a new notify command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the notify command with optional dry-run support
    ///
    /// A key that reaches the relay but is rejected there still exits with
    /// code 0; the rejection is printed as the delivery outcome. Only a
    /// missing key or, in dry-run mode, an unresolvable one is an error.
    ///
    /// # Arguments
    /// * `body` - Message body to push
    /// * `title` - Message title; defaults to "qiandao-rs test"
    /// * `dry_run` - If true, resolves the endpoint and exits without sending
    ///
    /// # Returns
    /// Returns Ok(()) on success, or AppError on failure
    ///
    /// # Errors
    /// - No send key configured
    /// - Dry-run endpoint resolution failures
    pub async fn execute(&self, body: &str, title: Option<&str>, dry_run: bool) -> AppResult<()> {
        let key = self.require_send_key()?;
        let title = title.unwrap_or(DEFAULT_TITLE);

        if dry_run {
            return self.validate_only(key, title);
        }

        info!(title = %title, "sending test notification");

        let provider = ServerChanProvider::new(key.to_string());
        let result = provider.send(title, body, &HashMap::new()).await;

        if result.succeeded {
            info!(provider = provider.name(), code = result.code, "notification delivered");
            println!("Notification delivered (code {})", result.code);
        } else {
            warn!(
                provider = provider.name(),
                code = result.code,
                message = %result.message,
                "notification failed"
            );
            println!(
                "Notification failed: {} (code {})",
                result.message, result.code
            );
        }

        Ok(())
    }

    /// Resolve the endpoint without sending anything
    fn validate_only(&self, key: &str, title: &str) -> AppResult<()> {
        let endpoint = resolve_endpoint(key)?;

        println!("✓ Send key resolves to: {}", endpoint);
        println!("✓ Title: {}", title);
        println!("Dry run completed successfully - nothing was sent");
        Ok(())
    }

    /// The configured send key, or a validation error naming how to set one
    fn require_send_key(&self) -> AppResult<&str> {
        self.config
            .notify
            .active_send_key()
            .ok_or_else(|| AppError::Validation {
                field: "notify.send_key".to_string(),
                reason: "A send key is required. Set QIANDAO_NOTIFY__SEND_KEY, the notify \
                         section of a configuration file, or pass --key."
                    .to_string(),
            })
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

//! Run command handler
//!
//! Handles the check-in command including dry-run validation, browser
//! session startup and workflow execution.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::browser::BrowserSession;
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::notify::{Notifier, ServerChanProvider, resolve_endpoint};
use crate::workflow::SignInWorkflow;

/// Handler for the run command
pub struct RunCommandHandler {
    config: Settings,
}

impl RunCommandHandler {
    /// Create a new run command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the run command with optional dry-run support
    ///
    /// A workflow that starts but fails still exits with code 0: the failure
    /// has already been logged and pushed, and a scheduled run must not
    /// retrigger on it. Only problems that prevent the workflow from starting
    /// at all are returned as errors.
    ///
    /// # Arguments
    /// * `dry_run` - If true, validates configuration and exits without launching a browser
    ///
    /// # Returns
    /// Returns Ok(()) on success, or AppError on failure
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Missing account credentials
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only().await;
        }

        self.ensure_credentials()?;

        if let Err(e) = self.run_workflow().await {
            debug!(error = %e, "run finished with an error that was already reported");
        }

        Ok(())
    }

    /// Validate configuration without launching a browser
    pub async fn validate_only(&self) -> AppResult<()> {
        // Validate configuration
        self.validate_configuration()?;

        println!("✓ Configuration is valid");

        self.ensure_credentials()?;
        println!("✓ Account credentials are present");

        println!("✓ Login page: {}", self.config.site.login_url);
        println!("✓ Check-in page: {}", self.config.site.checkin_url);

        match self.config.notify.active_send_key() {
            Some(key) => {
                let endpoint = resolve_endpoint(key)?;
                println!("✓ Send key resolves to: {}", endpoint);
            }
            None => {
                println!("✓ No send key configured - notifications will be skipped");
            }
        }

        println!("Dry run completed successfully - configuration is ready");
        Ok(())
    }

    /// Check that both login credentials are configured
    fn ensure_credentials(&self) -> AppResult<()> {
        if self.config.account.has_credentials() {
            return Ok(());
        }

        Err(AppError::Validation {
            field: "account".to_string(),
            reason: "Account credentials are required. Set QIANDAO_ACCOUNT__USERNAME and \
                     QIANDAO_ACCOUNT__PASSWORD, or the account section of a local \
                     configuration file."
                .to_string(),
        })
    }

    /// Launch the browser session and run the check-in workflow
    async fn run_workflow(&self) -> AppResult<()> {
        let notifier = self.build_notifier();

        let session = match BrowserSession::launch(&self.config.browser).await {
            Ok(session) => session,
            Err(e) => {
                self.report_launch_failure(notifier.as_deref(), &e).await;
                return Err(e);
            }
        };

        SignInWorkflow::new(Box::new(session), notifier, &self.config)
            .run()
            .await
    }

    /// Build the notification provider from the configured send key
    fn build_notifier(&self) -> Option<Arc<dyn Notifier>> {
        self.config
            .notify
            .active_send_key()
            .map(|key| Arc::new(ServerChanProvider::new(key.to_string())) as Arc<dyn Notifier>)
    }

    /// Report a browser startup failure
    ///
    /// The workflow reports its own failures once it owns the session. A
    /// session that never starts is reported here instead so a scheduled run
    /// still pushes something.
    async fn report_launch_failure(&self, notifier: Option<&dyn Notifier>, error: &AppError) {
        error!(error = %error, "browser session could not be started");

        let Some(notifier) = notifier else {
            info!("no send key configured, skipping notification");
            return;
        };

        let body = format!("browser session failed: {error}");
        let result = notifier
            .send("Daily check-in failed", &body, &HashMap::new())
            .await;
        if result.succeeded {
            info!(provider = notifier.name(), "notification delivered");
        } else {
            warn!(
                provider = notifier.name(),
                code = result.code,
                message = %result.message,
                "notification failed"
            );
        }
    }

    /// Validate the current configuration
    fn validate_configuration(&self) -> AppResult<()> {
        self.config.validate().map_err(|e| e.into())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.account.username = "alice".to_string();
        config.account.password = "secret".to_string();
        config
    }

    #[tokio::test]
    async fn test_run_handler_new() {
        let config = create_valid_config();
        let handler = RunCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_run_handler_dry_run() {
        let config = create_valid_config();
        let handler = RunCommandHandler::new(config);

        let result = handler.execute(true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_handler_dry_run_missing_credentials() {
        let config = Settings::default();
        let handler = RunCommandHandler::new(config);

        let result = handler.execute(true).await;
        assert!(matches!(
            result,
            Err(AppError::Validation { ref field, .. }) if field == "account"
        ));
    }

    #[tokio::test]
    async fn test_run_handler_dry_run_with_standard_key() {
        let mut config = create_valid_config();
        config.notify.send_key = Some("SCT239143EXAMPLEKEY".to_string());
        let handler = RunCommandHandler::new(config);

        let result = handler.execute(true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_handler_dry_run_malformed_instance_key() {
        let mut config = create_valid_config();
        config.notify.send_key = Some("sctpXtBADKEY".to_string());
        let handler = RunCommandHandler::new(config);

        let result = handler.execute(true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_handler_execute_missing_credentials() {
        let config = Settings::default();
        let handler = RunCommandHandler::new(config);

        let result = handler.execute(false).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_handler_dry_run_invalid_config() {
        let mut config = create_valid_config();
        config.site.login_url = "not-a-url".to_string();
        let handler = RunCommandHandler::new(config);

        let result = handler.execute(true).await;
        assert!(result.is_err());
    }
}

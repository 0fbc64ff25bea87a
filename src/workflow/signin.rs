//! Orchestration of one check-in run.
//!
//! Drives the page through login and check-in, captures the evidence
//! screenshots, and reports the outcome exactly once before tearing the
//! session down.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::state::WorkflowState;
use crate::browser::{PageDriver, Screenshotter};
use crate::config::settings::{AccountConfig, SiteConfig};
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::notify::Notifier;

/// Stages that can fail independently
#[derive(Debug, Clone, Copy)]
enum Stage {
    Login,
    CheckIn,
}

impl Stage {
    /// Label carried in logs and the failure notification body
    fn label(&self) -> &'static str {
        match self {
            Stage::Login => "login failed",
            Stage::CheckIn => "check-in failed",
        }
    }

    /// File name prefix for the failure screenshot
    fn error_screenshot(&self) -> &'static str {
        match self {
            Stage::Login => "login_error",
            Stage::CheckIn => "signin_error",
        }
    }
}

struct StageFailure {
    stage: Stage,
    error: AppError,
}

/// One check-in run against an already-launched browser session
pub struct SignInWorkflow {
    driver: Box<dyn PageDriver>,
    notifier: Option<Arc<dyn Notifier>>,
    site: SiteConfig,
    account: AccountConfig,
    element_timeout: Duration,
    settle: Duration,
    screenshots: Screenshotter,
    state: WorkflowState,
}

impl SignInWorkflow {
    /// Creates a workflow over the given driver and notifier
    ///
    /// # Arguments
    /// * `driver` - Launched page driver; the workflow owns its teardown
    /// * `notifier` - Where the single outcome report goes; `None` skips it
    /// * `settings` - Site, account, timing and screenshot configuration
    pub fn new(
        driver: Box<dyn PageDriver>,
        notifier: Option<Arc<dyn Notifier>>,
        settings: &Settings,
    ) -> Self {
        Self {
            driver,
            notifier,
            site: settings.site.clone(),
            account: settings.account.clone(),
            element_timeout: settings.browser.element_timeout(),
            settle: settings.browser.settle(),
            screenshots: Screenshotter::new(&settings.screenshots.dir),
            state: WorkflowState::Idle,
        }
    }

    /// Current run state
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Runs login and check-in to completion
    ///
    /// Exactly one notification attempt and exactly one teardown happen on
    /// every path. The stage error is returned so the caller can log it;
    /// reporting has already been taken care of here.
    pub async fn run(&mut self) -> AppResult<()> {
        self.state = WorkflowState::SessionStarted;

        let result = match self.execute().await {
            Ok(after_path) => {
                self.state = WorkflowState::Done;
                info!(state = %self.state, "check-in flow completed");
                self.report_success(&after_path).await;
                Ok(())
            }
            Err(failure) => {
                self.state = WorkflowState::Failed;
                error!(stage = failure.stage.label(), error = %failure.error, "check-in flow failed");
                self.capture_failure_screenshot(failure.stage).await;
                self.report_failure(&failure).await;
                Err(failure.error)
            }
        };

        self.driver.close().await;
        result
    }

    async fn execute(&mut self) -> Result<PathBuf, StageFailure> {
        self.login().await.map_err(|error| StageFailure {
            stage: Stage::Login,
            error,
        })?;
        self.state = WorkflowState::LoggedIn;

        let after_path = self.check_in().await.map_err(|error| StageFailure {
            stage: Stage::CheckIn,
            error,
        })?;
        self.state = WorkflowState::SignedIn;

        Ok(after_path)
    }

    /// Logs into the site with the configured credentials
    async fn login(&mut self) -> AppResult<()> {
        self.driver.goto(&self.site.login_url).await?;
        info!(url = %self.site.login_url, "opened login page");

        self.driver
            .wait_for_element(&self.site.username_selector, self.element_timeout)
            .await?;
        self.driver
            .wait_for_element(&self.site.password_selector, self.element_timeout)
            .await?;

        self.driver
            .type_into(&self.site.username_selector, &self.account.username)
            .await?;
        self.driver
            .type_into(&self.site.password_selector, &self.account.password)
            .await?;
        self.driver.click(&self.site.login_button_selector).await?;
        info!("submitted credentials");

        tokio::time::sleep(self.settle).await;
        Ok(())
    }

    /// Opens the check-in page, clicks the control, returns the result screenshot path
    async fn check_in(&mut self) -> AppResult<PathBuf> {
        self.driver.goto(&self.site.checkin_url).await?;
        info!(url = %self.site.checkin_url, "opened check-in page");
        tokio::time::sleep(self.settle).await;

        self.screenshots
            .capture(self.driver.as_ref(), "before_signin")
            .await?;

        self.driver
            .wait_for_element(&self.site.checkin_button_selector, self.element_timeout)
            .await?;
        self.driver.click(&self.site.checkin_button_selector).await?;
        info!("check-in control clicked");

        tokio::time::sleep(self.settle).await;
        let after_path = self
            .screenshots
            .capture(self.driver.as_ref(), "after_signin")
            .await?;
        Ok(after_path)
    }

    /// Best-effort evidence capture; never masks the stage error
    async fn capture_failure_screenshot(&self, stage: Stage) {
        if let Err(e) = self
            .screenshots
            .capture(self.driver.as_ref(), stage.error_screenshot())
            .await
        {
            warn!(error = %e, "failure screenshot could not be captured");
        }
    }

    async fn report_success(&self, after_path: &Path) {
        let body = format!(
            "Check-in completed, result screenshot: {}",
            after_path.display()
        );
        self.notify("Daily check-in succeeded", &body).await;
    }

    async fn report_failure(&self, failure: &StageFailure) {
        let body = format!("{}: {}", failure.stage.label(), failure.error);
        self.notify("Daily check-in failed", &body).await;
    }

    /// The single outcome report of the run
    async fn notify(&self, title: &str, body: &str) {
        let Some(notifier) = &self.notifier else {
            info!("no send key configured, skipping notification");
            return;
        };

        let result = notifier.send(title, body, &HashMap::new()).await;
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
}

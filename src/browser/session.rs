//! chromiumoxide-backed page driver.
//!
//! Owns the Chrome process, the CDP event-handler task, and the single page
//! every workflow run works on.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::driver::PageDriver;
use crate::config::settings::BrowserConfig;
use crate::error::{AppError, AppResult};

/// Executable locations probed when no binary path is configured
const CHROME_CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

/// Live browser session
///
/// Launch with [`BrowserSession::launch`]; the caller must `close` it when
/// done. Dropping without closing leaves cleanup to the Chrome process exit.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    poll_interval: Duration,
    closed: bool,
}

impl BrowserSession {
    /// Launches Chrome and opens a blank page
    ///
    /// # Arguments
    /// * `config` - Browser settings (binary path, headless, window size, args)
    pub async fn launch(config: &BrowserConfig) -> AppResult<Self> {
        let chrome_path = match &config.binary_path {
            Some(path) => path.clone(),
            None => find_chrome().ok_or_else(|| {
                browser_err(
                    "locate chrome executable",
                    anyhow::anyhow!("no chrome or chromium binary found"),
                )
            })?,
        };
        debug!(chrome = %chrome_path, headless = config.headless, "launching browser");

        let browser_config = build_browser_config(config, &chrome_path)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| browser_err("launch browser", e))?;
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // Do not leak the Chrome process when page creation fails
                let mut browser = browser;
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(browser_err("open page", e));
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
            poll_interval: config.poll_interval(),
            closed: false,
        })
    }
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn goto(&self, url: &str) -> AppResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| browser_err(format!("navigate to {url}"), e))?;
        Ok(())
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> AppResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(AppError::ElementWaitTimeout {
                    selector: selector.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn type_into(&self, selector: &str, text: &str) -> AppResult<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| browser_err(format!("find element {selector}"), e))?;
        element
            .type_str(text)
            .await
            .map_err(|e| browser_err(format!("type into {selector}"), e))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> AppResult<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| browser_err(format!("find element {selector}"), e))?;
        element
            .click()
            .await
            .map_err(|e| browser_err(format!("click {selector}"), e))?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> AppResult<()> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        let png = self
            .page
            .screenshot(params)
            .await
            .map_err(|e| browser_err("capture screenshot", e))?;
        tokio::fs::write(path, &png)
            .await
            .map_err(|e| browser_err(format!("save screenshot to {}", path.display()), e))?;
        Ok(())
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "browser did not exit cleanly");
        }
        self.handler_task.abort();
        debug!("browser session closed");
    }
}

/// Builds the chromiumoxide launch configuration from browser settings
fn build_browser_config(
    config: &BrowserConfig,
    chrome_path: &str,
) -> AppResult<chromiumoxide::BrowserConfig> {
    let mut builder = chromiumoxide::BrowserConfig::builder();
    builder = builder
        .chrome_executable(chrome_path)
        .viewport(None)
        .arg(format!(
            "--window-size={},{}",
            config.window_width, config.window_height
        ));
    for arg in &config.args {
        builder = builder.arg(arg.as_str());
    }
    if !config.headless {
        builder = builder.with_head();
    }
    builder
        .build()
        .map_err(|e| browser_err("configure browser", anyhow::anyhow!(e)))
}

/// Find a Chrome/Chromium executable among the well-known locations
fn find_chrome() -> Option<String> {
    for candidate in CHROME_CANDIDATES {
        if Path::new(candidate).exists() {
            return Some((*candidate).to_string());
        }
    }

    for binary in ["google-chrome", "chromium"] {
        if let Ok(output) = std::process::Command::new("which").arg(binary).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Some(path);
                }
            }
        }
    }

    None
}

fn browser_err(operation: impl Into<String>, source: impl Into<anyhow::Error>) -> AppError {
    AppError::Browser {
        operation: operation.into(),
        source: source.into(),
    }
}

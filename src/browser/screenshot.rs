//! Screenshot capture with timestamped file names.

use std::path::PathBuf;

use jiff::Zoned;
use tracing::info;

use super::driver::PageDriver;
use crate::error::AppResult;

/// Saves stage-named screenshots into the configured directory
pub struct Screenshotter {
    dir: PathBuf,
}

impl Screenshotter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Captures a screenshot for the stage, creating the directory on demand
    ///
    /// # Arguments
    /// * `driver` - Page to capture
    /// * `stage` - Stage label used as the file name prefix
    ///
    /// # Returns
    /// Path of the written PNG
    pub async fn capture(&self, driver: &dyn PageDriver, stage: &str) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            crate::error::AppError::Browser {
                operation: format!("create screenshot directory {}", self.dir.display()),
                source: e.into(),
            }
        })?;

        let path = self.dir.join(screenshot_file_name(stage, &Zoned::now()));
        driver.screenshot(&path).await?;
        info!(path = %path.display(), "screenshot saved");
        Ok(path)
    }
}

/// File name for a stage screenshot: `{stage}_{YYYYMMDD_HHMMSS}.png`
fn screenshot_file_name(stage: &str, now: &Zoned) -> String {
    format!("{stage}_{}.png", now.strftime("%Y%m%d_%H%M%S"))
}

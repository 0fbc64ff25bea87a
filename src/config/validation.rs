//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{
    BrowserConfig, FileSettings, LoggerSettings, ScreenshotConfig, Settings, SiteConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl SiteConfig {
    /// Validate site configuration
    ///
    /// # Validation Rules
    /// - Page URLs must be non-empty http(s) URLs
    /// - Element selectors must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_page_url("site.login_url", &self.login_url)?;
        validate_page_url("site.checkin_url", &self.checkin_url)?;

        validate_selector("site.username_selector", &self.username_selector)?;
        validate_selector("site.password_selector", &self.password_selector)?;
        validate_selector("site.login_button_selector", &self.login_button_selector)?;
        validate_selector("site.checkin_button_selector", &self.checkin_button_selector)?;

        Ok(())
    }
}

fn validate_page_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::validation(
            field,
            "Page URL is required. Please specify a full http(s) URL.",
        ));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("Invalid URL '{url}'. Expected an http:// or https:// URL."),
        });
    }

    Ok(())
}

fn validate_selector(field: &str, selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::validation(
            field,
            "Element selector must not be empty.",
        ));
    }

    Ok(())
}

impl BrowserConfig {
    /// Validate browser configuration
    ///
    /// # Validation Rules
    /// - Window dimensions must be greater than 0
    /// - Element timeout must be greater than 0
    /// - Poll interval must be greater than 0 and must not exceed the element timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 {
            return Err(ConfigError::validation(
                "browser.window_width",
                "Window width must be greater than 0 pixels.",
            ));
        }

        if self.window_height == 0 {
            return Err(ConfigError::validation(
                "browser.window_height",
                "Window height must be greater than 0 pixels.",
            ));
        }

        if self.element_timeout_ms == 0 {
            return Err(ConfigError::validation(
                "browser.element_timeout_ms",
                "Element timeout must be greater than 0 milliseconds.",
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::validation(
                "browser.poll_interval_ms",
                "Poll interval must be greater than 0 milliseconds.",
            ));
        }

        if self.poll_interval_ms > self.element_timeout_ms {
            return Err(ConfigError::ValidationError {
                field: "browser.poll_interval_ms".to_string(),
                message: format!(
                    "Poll interval ({} ms) cannot exceed the element timeout ({} ms).",
                    self.poll_interval_ms, self.element_timeout_ms
                ),
            });
        }

        Ok(())
    }
}

impl ScreenshotConfig {
    /// Validate screenshot configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.trim().is_empty() {
            return Err(ConfigError::validation(
                "screenshots.dir",
                "Screenshot directory must not be empty.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        // If file logging is enabled, path must not be empty
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        // Validate log format
        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate log level
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // Validate file settings
        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered. Account credentials are deliberately not
    /// validated here: only the `run` command requires them, and it checks
    /// their presence itself before any browser activity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.site.validate()?;
        self.browser.validate()?;
        self.screenshots.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

//! Configuration settings structures for qiandao-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_login_url() -> String {
    "https://vip.taoqitu.pro/index.html".to_string()
}

fn default_checkin_url() -> String {
    "https://vip.taoqitu.pro/qiandao.html".to_string()
}

fn default_username_selector() -> String {
    "#regusername".to_string()
}

fn default_password_selector() -> String {
    "#regpassword".to_string()
}

fn default_login_button_selector() -> String {
    ".loginbutton".to_string()
}

fn default_checkin_button_selector() -> String {
    ".invite_get_amount".to_string()
}

fn default_true() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_browser_args() -> Vec<String> {
    vec![
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-features=VizDisplayCompositor".to_string(),
        "--disable-extensions".to_string(),
    ]
}

fn default_element_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_settle_ms() -> u64 {
    5_000
}

fn default_screenshot_dir() -> String {
    "screenshots".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "signin.log".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

// ============================================================================
// Account Configuration
// ============================================================================

/// Site account credentials
///
/// Both fields default to empty strings and are expected to arrive through
/// environment overrides (`QIANDAO_ACCOUNT__USERNAME`,
/// `QIANDAO_ACCOUNT__PASSWORD`) rather than committed configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Login username
    #[serde(default)]
    pub username: String,

    /// Login password
    #[serde(default)]
    pub password: String,
}

impl AccountConfig {
    /// Whether both credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
        }
    }
}

// ============================================================================
// Site Configuration
// ============================================================================

/// Target site pages and element selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Login page URL
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Check-in page URL
    #[serde(default = "default_checkin_url")]
    pub checkin_url: String,

    /// CSS selector for the username input
    #[serde(default = "default_username_selector")]
    pub username_selector: String,

    /// CSS selector for the password input
    #[serde(default = "default_password_selector")]
    pub password_selector: String,

    /// CSS selector for the login button
    #[serde(default = "default_login_button_selector")]
    pub login_button_selector: String,

    /// CSS selector for the check-in button
    #[serde(default = "default_checkin_button_selector")]
    pub checkin_button_selector: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            checkin_url: default_checkin_url(),
            username_selector: default_username_selector(),
            password_selector: default_password_selector(),
            login_button_selector: default_login_button_selector(),
            checkin_button_selector: default_checkin_button_selector(),
        }
    }
}

// ============================================================================
// Browser Configuration
// ============================================================================

/// Chrome/Chromium launch and timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Explicit browser binary path; well-known locations are probed when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_path: Option<String>,

    /// Whether to run the browser headless
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Browser window width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Extra command-line arguments passed to the browser
    #[serde(default = "default_browser_args")]
    pub args: Vec<String>,

    /// Upper bound for element waits in milliseconds
    #[serde(default = "default_element_timeout_ms")]
    pub element_timeout_ms: u64,

    /// Interval between element lookups in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Fixed pause after navigation and clicks in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl BrowserConfig {
    /// Element wait bound as a [`Duration`]
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    /// Element lookup interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Page settle pause as a [`Duration`]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            binary_path: None,
            headless: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            args: default_browser_args(),
            element_timeout_ms: default_element_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

// ============================================================================
// Notification Configuration
// ============================================================================

/// Push notification configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Send key for the notification relay; notifications are skipped when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_key: Option<String>,
}

impl NotifyConfig {
    /// The configured send key, treating empty/blank values as absent
    pub fn active_send_key(&self) -> Option<&str> {
        self.send_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { send_key: None }
    }
}

// ============================================================================
// Screenshot Configuration
// ============================================================================

/// Screenshot output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Directory screenshots are written to, created on demand
    #[serde(default = "default_screenshot_dir")]
    pub dir: String,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            dir: default_screenshot_dir(),
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether console output uses ANSI colors
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log file path
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to an existing log file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_log_path(),
            append: true,
            format: default_log_format(),
        }
    }
}

/// Logger settings loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    /// Convert ConsoleSettings to ConsoleConfig
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    /// Parse the format string into LogFormat enum
    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Aggregated Settings
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Site account credentials
    #[serde(default)]
    pub account: AccountConfig,

    /// Target site pages and selectors
    #[serde(default)]
    pub site: SiteConfig,

    /// Browser launch and timing configuration
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Push notification configuration
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Screenshot output configuration
    #[serde(default)]
    pub screenshots: ScreenshotConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================================================
    // Arbitrary implementations for property-based testing
    // ========================================================================

    fn arb_account_config() -> impl Strategy<Value = AccountConfig> {
        ("[a-z][a-z0-9_]{0,15}", "[a-zA-Z0-9!@#]{0,20}")
            .prop_map(|(username, password)| AccountConfig { username, password })
    }

    fn arb_site_config() -> impl Strategy<Value = SiteConfig> {
        (
            prop_oneof![
                Just("https://vip.taoqitu.pro/index.html".to_string()),
                Just("https://example.com/login".to_string()),
            ],
            prop_oneof![
                Just("https://vip.taoqitu.pro/qiandao.html".to_string()),
                Just("https://example.com/checkin".to_string()),
            ],
            "#[a-z][a-z0-9_-]{0,15}",  // username_selector
            "#[a-z][a-z0-9_-]{0,15}",  // password_selector
            "\\.[a-z][a-z0-9_-]{0,15}", // login_button_selector
            "\\.[a-z][a-z0-9_-]{0,15}", // checkin_button_selector
        )
            .prop_map(
                |(
                    login_url,
                    checkin_url,
                    username_selector,
                    password_selector,
                    login_button_selector,
                    checkin_button_selector,
                )| SiteConfig {
                    login_url,
                    checkin_url,
                    username_selector,
                    password_selector,
                    login_button_selector,
                    checkin_button_selector,
                },
            )
    }

    fn arb_browser_config() -> impl Strategy<Value = BrowserConfig> {
        (
            prop_oneof![
                Just(None),
                Just(Some("/usr/bin/google-chrome".to_string())),
                Just(Some("/usr/bin/chromium".to_string())),
            ],
            any::<bool>(),        // headless
            640u32..=3840u32,     // window_width
            480u32..=2160u32,     // window_height
            prop::collection::vec("--[a-z-]{2,24}", 0..4), // args
            1_000u64..=60_000u64, // element_timeout_ms
            100u64..=1_000u64,    // poll_interval_ms
            0u64..=10_000u64,     // settle_ms
        )
            .prop_map(
                |(
                    binary_path,
                    headless,
                    window_width,
                    window_height,
                    args,
                    element_timeout_ms,
                    poll_interval_ms,
                    settle_ms,
                )| BrowserConfig {
                    binary_path,
                    headless,
                    window_width,
                    window_height,
                    args,
                    element_timeout_ms,
                    poll_interval_ms,
                    settle_ms,
                },
            )
    }

    fn arb_notify_config() -> impl Strategy<Value = NotifyConfig> {
        prop_oneof![
            Just(None),
            Just(Some("SCT123456ABCDEF".to_string())),
            Just(Some("sctp123t-SENDKEY".to_string())),
        ]
        .prop_map(|send_key| NotifyConfig { send_key })
    }

    fn arb_screenshot_config() -> impl Strategy<Value = ScreenshotConfig> {
        prop_oneof![
            Just("screenshots".to_string()),
            Just("out/shots".to_string()),
        ]
        .prop_map(|dir| ScreenshotConfig { dir })
    }

    fn arb_console_settings() -> impl Strategy<Value = ConsoleSettings> {
        (any::<bool>(), any::<bool>())
            .prop_map(|(enabled, colored)| ConsoleSettings { enabled, colored })
    }

    fn arb_file_settings() -> impl Strategy<Value = FileSettings> {
        (
            any::<bool>(), // enabled
            prop_oneof![
                Just("signin.log".to_string()),
                Just("logs/signin.log".to_string()),
            ],
            any::<bool>(), // append
            prop_oneof![
                Just("full".to_string()),
                Just("compact".to_string()),
                Just("json".to_string()),
            ],
        )
            .prop_map(|(enabled, path, append, format)| FileSettings {
                enabled,
                path,
                append,
                format,
            })
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![
                Just("trace".to_string()),
                Just("debug".to_string()),
                Just("info".to_string()),
                Just("warn".to_string()),
                Just("error".to_string()),
            ],
            arb_console_settings(),
            arb_file_settings(),
        )
            .prop_map(|(level, console, file)| LoggerSettings {
                level,
                console,
                file,
            })
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_account_config(),
            arb_site_config(),
            arb_browser_config(),
            arb_notify_config(),
            arb_screenshot_config(),
            arb_logger_settings(),
        )
            .prop_map(
                |(account, site, browser, notify, screenshots, logger)| Settings {
                    account,
                    site,
                    browser,
                    notify,
                    screenshots,
                    logger,
                },
            )
    }

    // ========================================================================
    // Property-based tests
    // ========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any valid Settings instance, serializing to TOML and then
        /// deserializing back produces an equivalent Settings instance.
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");

            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");

            prop_assert_eq!(settings, deserialized);
        }
    }

    // ========================================================================
    // Unit tests
    // ========================================================================

    #[test]
    fn test_account_config_defaults() {
        let config = AccountConfig::default();
        assert_eq!(config.username, "");
        assert_eq!(config.password, "");
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_account_config_has_credentials() {
        let config = AccountConfig {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(config.has_credentials());

        let config = AccountConfig {
            username: "alice".to_string(),
            password: "   ".to_string(),
        };
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_site_config_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.login_url, "https://vip.taoqitu.pro/index.html");
        assert_eq!(config.checkin_url, "https://vip.taoqitu.pro/qiandao.html");
        assert_eq!(config.username_selector, "#regusername");
        assert_eq!(config.password_selector, "#regpassword");
        assert_eq!(config.login_button_selector, ".loginbutton");
        assert_eq!(config.checkin_button_selector, ".invite_get_amount");
    }

    #[test]
    fn test_browser_config_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.binary_path, None);
        assert!(config.headless);
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
        assert!(config.args.contains(&"--no-sandbox".to_string()));
        assert_eq!(config.element_timeout_ms, 10_000);
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.settle_ms, 5_000);
    }

    #[test]
    fn test_browser_config_durations() {
        let config = BrowserConfig::default();
        assert_eq!(config.element_timeout(), Duration::from_secs(10));
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.settle(), Duration::from_secs(5));
    }

    #[test]
    fn test_notify_config_active_send_key() {
        assert_eq!(NotifyConfig::default().active_send_key(), None);

        let config = NotifyConfig {
            send_key: Some("  ".to_string()),
        };
        assert_eq!(config.active_send_key(), None);

        let config = NotifyConfig {
            send_key: Some(" SCT123KEY ".to_string()),
        };
        assert_eq!(config.active_send_key(), Some("SCT123KEY"));
    }

    #[test]
    fn test_screenshot_config_defaults() {
        let config = ScreenshotConfig::default();
        assert_eq!(config.dir, "screenshots");
    }

    #[test]
    fn test_logger_settings_defaults() {
        let settings = LoggerSettings::default();
        assert_eq!(settings.level, "info");
        assert!(settings.console.enabled);
        assert!(settings.console.colored);
        assert!(settings.file.enabled);
        assert_eq!(settings.file.path, "signin.log");
        assert!(settings.file.append);
        assert_eq!(settings.file.format, "full");
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.account, AccountConfig::default());
        assert_eq!(settings.site, SiteConfig::default());
        assert_eq!(settings.browser, BrowserConfig::default());
        assert_eq!(settings.notify, NotifyConfig::default());
        assert_eq!(settings.screenshots, ScreenshotConfig::default());
        assert_eq!(settings.logger, LoggerSettings::default());
    }

    #[test]
    fn test_settings_deserialize_empty() {
        let settings: Settings = toml::from_str("").expect("empty TOML should deserialize");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
            [account]
            username = "alice"

            [browser]
            headless = false
            settle_ms = 1000
        "#;

        let settings: Settings = toml::from_str(toml_str).expect("partial TOML should deserialize");
        assert_eq!(settings.account.username, "alice");
        assert_eq!(settings.account.password, "");
        assert!(!settings.browser.headless);
        assert_eq!(settings.browser.settle_ms, 1000);
        // Untouched sections keep their defaults
        assert_eq!(settings.site, SiteConfig::default());
        assert_eq!(settings.browser.element_timeout_ms, 10_000);
    }

    #[test]
    fn test_settings_deserialize_full() {
        let toml_str = r#"
            [account]
            username = "alice"
            password = "secret"

            [site]
            login_url = "https://example.com/login"
            checkin_url = "https://example.com/checkin"
            username_selector = "#user"
            password_selector = "#pass"
            login_button_selector = ".submit"
            checkin_button_selector = ".daily"

            [browser]
            binary_path = "/usr/bin/chromium"
            headless = true
            window_width = 1280
            window_height = 720
            args = ["--no-sandbox"]
            element_timeout_ms = 8000
            poll_interval_ms = 250
            settle_ms = 2000

            [notify]
            send_key = "SCT123456ABCDEF"

            [screenshots]
            dir = "out/shots"

            [logger]
            level = "debug"

            [logger.console]
            enabled = true
            colored = false

            [logger.file]
            enabled = true
            path = "logs/signin.log"
            append = false
            format = "json"
        "#;

        let settings: Settings = toml::from_str(toml_str).expect("full TOML should deserialize");
        assert_eq!(settings.account.username, "alice");
        assert_eq!(settings.site.login_url, "https://example.com/login");
        assert_eq!(
            settings.browser.binary_path,
            Some("/usr/bin/chromium".to_string())
        );
        assert_eq!(settings.browser.window_width, 1280);
        assert_eq!(settings.browser.args, vec!["--no-sandbox".to_string()]);
        assert_eq!(settings.notify.active_send_key(), Some("SCT123456ABCDEF"));
        assert_eq!(settings.screenshots.dir, "out/shots");
        assert_eq!(settings.logger.level, "debug");
        assert!(!settings.logger.console.colored);
        assert_eq!(settings.logger.file.format, "json");
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings {
                enabled: false,
                ..Default::default()
            },
        };

        let config = settings.into_logger_config().expect("Should convert");
        assert_eq!(config.level, "debug");
        assert!(config.console.enabled);
        assert!(!config.console.colored);
        assert!(!config.file.enabled);
    }

    #[test]
    fn test_logger_settings_into_logger_config_with_file() {
        let settings = LoggerSettings {
            level: "info".to_string(),
            console: ConsoleSettings::default(),
            file: FileSettings {
                enabled: true,
                path: "logs/signin.log".to_string(),
                append: true,
                format: "compact".to_string(),
            },
        };

        let config = settings.into_logger_config().expect("Should convert");
        assert!(config.file.enabled);
        assert_eq!(config.file.path, PathBuf::from("logs/signin.log"));
        assert!(config.file.append);
        assert_eq!(config.file.format, LogFormat::Compact);
    }

    #[test]
    fn test_logger_settings_into_logger_config_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };

        assert!(settings.into_logger_config().is_err());
    }

    #[test]
    fn test_logger_settings_into_logger_config_invalid_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "xml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(settings.into_logger_config().is_err());
    }

    #[test]
    fn test_logger_settings_into_logger_config_both_disabled() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            file: FileSettings {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(settings.into_logger_config().is_err());
    }
}

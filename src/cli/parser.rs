//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// Automated daily check-in with push notification
#[derive(Parser, Debug)]
#[command(name = "qiandao-rs")]
#[command(about = "Automated daily check-in with push notification")]
#[command(long_about = "
Qiandao-rs logs into the target site with a real browser, clicks the daily
check-in control, saves evidence screenshots, and reports the outcome through
a ServerChan push notification.

EXAMPLES:
    # Run the check-in with configured credentials
    qiandao-rs run

    # Run with a visible browser window
    qiandao-rs run --headful

    # Validate configuration without launching a browser
    qiandao-rs run --dry-run

    # Use custom configuration file
    qiandao-rs --config /path/to/config.toml run

    # Run in development mode with verbose logging
    qiandao-rs --env development --verbose run

    # Send a test notification
    qiandao-rs notify \"hello from qiandao-rs\" --title \"Test\"

    # Check where a notification would go without sending it
    qiandao-rs notify \"hello\" --dry-run

For more information about configuration options, see the documentation.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Specify a custom configuration file to use instead of the default.
    /// The file should be in TOML format and contain valid configuration sections.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/qiandao-rs/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Force the application to use a specific environment configuration.
    /// This affects which configuration files are loaded and default settings.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level, showing detailed information
    /// about application operations. Useful for troubleshooting.
    /// Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only, hiding informational messages.
    /// Useful for scheduled runs or automated scripts.
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the check-in workflow (default)
    ///
    /// Launches the browser, logs into the configured site, performs the
    /// check-in, captures screenshots, and pushes a result notification.
    ///
    /// Examples:
    ///   qiandao-rs run               # Run with configured settings
    ///   qiandao-rs run --headful     # Show the browser window
    ///   qiandao-rs run --dry-run     # Validate config without a browser
    Run {
        /// Show the browser window
        ///
        /// Disables headless mode for this run so the browser is visible.
        /// Useful for debugging selector or login problems.
        #[arg(long)]
        headful: bool,

        /// Log level override
        ///
        /// Set the logging verbosity for this run.
        /// This overrides both configuration file settings and global --verbose/--quiet flags.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Performs a complete configuration validation check without launching
        /// a browser or sending anything. Useful for testing configuration
        /// changes or deployment validation.
        /// Returns exit code 0 if valid, non-zero if invalid.
        #[arg(long)]
        dry_run: bool,
    },
    /// Send a test notification
    ///
    /// Pushes the given message through the configured relay. Useful for
    /// verifying the send key before scheduling unattended runs.
    ///
    /// Examples:
    ///   qiandao-rs notify "hello"                    # Send with the default title
    ///   qiandao-rs notify "hello" --title "Test"     # Send with a custom title
    ///   qiandao-rs notify "hello" --dry-run          # Show the endpoint, send nothing
    Notify {
        /// Message body to push
        #[arg(value_name = "BODY")]
        body: String,

        /// Message title
        ///
        /// Shown as the notification subject.
        ///
        /// Default: "qiandao-rs test"
        #[arg(short, long, value_name = "TITLE")]
        title: Option<String>,

        /// Send key override
        ///
        /// Use this key instead of the configured notify.send_key.
        ///
        /// Example: --key SCT239143EXAMPLEKEY
        #[arg(long, value_name = "KEY", value_parser = super::validation::validate_send_key)]
        key: Option<String>,

        /// Resolve the endpoint and exit without sending
        ///
        /// Prints where the message would go. Returns exit code 0 if the key
        /// resolves, non-zero if it is malformed.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate CLI arguments and provide detailed error messages
    ///
    /// This method performs additional validation beyond what clap provides,
    /// ensuring that all argument combinations are valid and providing
    /// specific error messages for validation failures.
    pub fn validate(&self) -> Result<(), String> {
        // Validate command-specific arguments
        if let Some(ref command) = self.command {
            match command {
                Commands::Run { .. } => {}
                Commands::Notify { body, .. } => {
                    if body.trim().is_empty() {
                        return Err("Notification body cannot be empty".to_string());
                    }
                }
            }
        }

        // Validate global argument combinations
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

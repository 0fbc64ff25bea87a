//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{NotifyCommandHandler, RunCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the given settings
///
/// This function dispatches to the appropriate command handler based on
/// the parsed CLI arguments. Running without a subcommand behaves like
/// `run` without flags.
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Merged and validated settings
///
/// # Returns
/// Returns Ok(()) on success, or AppError on failure
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    // Validate CLI arguments and configuration
    validate_command_args(cli, &settings)?;

    match &cli.command {
        Some(Commands::Run { dry_run, .. }) => {
            RunCommandHandler::new(settings).execute(*dry_run).await
        }
        None => RunCommandHandler::new(settings).execute(false).await,
        Some(Commands::Notify {
            body,
            title,
            dry_run,
            ..
        }) => {
            NotifyCommandHandler::new(settings)
                .execute(body, title.as_deref(), *dry_run)
                .await
        }
    }
}

/// Validate command arguments and configuration before execution
///
/// This function performs comprehensive validation of CLI arguments,
/// providing specific error messages for validation failures.
fn validate_command_args(cli: &Cli, _settings: &Settings) -> AppResult<()> {
    // Validate CLI arguments first
    if let Err(msg) = cli.validate() {
        return Err(crate::error::AppError::Validation {
            field: "cli_arguments".to_string(),
            reason: msg,
        });
    }

    Ok(())
}

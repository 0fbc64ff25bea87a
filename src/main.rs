use clap::Parser;
use qiandao_rs::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};
use qiandao_rs::config::Environment;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (development convenience)
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    // Validate CLI arguments
    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Apply environment override before any configuration is loaded
    if let Some(env) = &cli.env {
        let environment = Environment::from(env.clone());
        unsafe {
            std::env::set_var(Environment::ENV_VAR, environment.as_str());
        }
    }

    // Load and merge configuration
    let settings = load_and_merge_config(&cli)?;

    // Initialize logger from the merged configuration
    init_logger_from_settings(&settings)?;

    // Log application startup information
    tracing::info!(
        app_name = env!("CARGO_PKG_NAME"),
        app_version = qiandao_rs::pkg_version(),
        environment = %Environment::from_env().as_str(),
        "Application starting"
    );

    // Execute the command; workflow failures have already been reported and
    // do not reach this point as errors
    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = %e, "Command execution failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

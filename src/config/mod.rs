//! Configuration management module for qiandao-rs
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environment configurations (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults - every setting has one, so no file is required
//! 2. `default.toml` - Base default configuration
//! 3. `{environment}.toml` - Environment-specific configuration
//! 4. `local.toml` - Local development overrides (not committed to version control)
//! 5. `QIANDAO_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::Settings;

//! Qiandao-RS Library
//!
//! Core library modules for the qiandao-rs check-in automation tool.

use shadow_rs::shadow;
shadow!(build);

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod notify;
pub mod workflow;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}

//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    // Check if file exists
    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    // Check if it's a file (not a directory)
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    // Check if file is readable
    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate a ServerChan send key argument
///
/// Only shape problems are rejected here. Whether the key routes to the
/// classic or instanced endpoint is decided at send time.
pub fn validate_send_key(key_str: &str) -> Result<String, String> {
    let key = key_str.trim();

    if key.is_empty() {
        return Err("Send key cannot be empty".to_string());
    }

    if key.chars().any(|c| c.is_whitespace()) {
        return Err("Send key cannot contain whitespace".to_string());
    }

    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_file_path_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logger]").unwrap();

        let result = validate_config_file_path(file.path().to_str().unwrap());
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), file.path());
    }

    #[test]
    fn test_config_file_path_missing() {
        let result = validate_config_file_path("/nonexistent/qiandao-config.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_config_file_path_directory() {
        let dir = tempfile::tempdir().unwrap();

        let result = validate_config_file_path(dir.path().to_str().unwrap());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not a file"));
    }

    #[test]
    fn test_send_key_validation_valid_keys() {
        let valid_keys = [
            "SCT239143EXAMPLEKEY",
            "sctp12345tEXAMPLEKEY",
            "  SCT239143EXAMPLEKEY  ",
            "anything-without-spaces",
        ];

        for key_str in valid_keys {
            let result = validate_send_key(key_str);
            assert!(result.is_ok(), "Key '{}' should be valid", key_str);
        }
    }

    #[test]
    fn test_send_key_validation_invalid_keys() {
        let invalid_keys = ["", "   ", "key with spaces", "key\twith\ttabs"];

        for key_str in invalid_keys {
            let result = validate_send_key(key_str);
            assert!(result.is_err(), "Key '{}' should be invalid", key_str);
        }
    }

    #[test]
    fn test_send_key_validation_trims() {
        let result = validate_send_key("  SCT239143EXAMPLEKEY  ").unwrap();
        assert_eq!(result, "SCT239143EXAMPLEKEY");
    }
}

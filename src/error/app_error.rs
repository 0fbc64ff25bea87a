use crate::config::ConfigError;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// This enum provides structured error information for the check-in workflow,
/// the browser session, and the notification dispatcher, supporting automatic
/// conversion from anyhow and detailed context for logs and notifications.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Expected page element did not appear within the wait bound
    #[error("Timed out after {timeout_ms} ms waiting for element '{selector}'")]
    ElementWaitTimeout { selector: String, timeout_ms: u64 },

    /// Network operation error with operation context
    #[error("Network operation failed: {operation}")]
    Network {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Browser launch or command error with operation context
    #[error("Browser operation failed: {operation}")]
    Browser {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ValidationError { field, message } => AppError::Validation {
                field,
                reason: message,
            },
            other => AppError::Configuration {
                key: "settings".to_string(),
                source: other.into(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_wait_timeout_display() {
        let error = AppError::ElementWaitTimeout {
            selector: "#regusername".to_string(),
            timeout_ms: 10_000,
        };

        assert_eq!(
            error.to_string(),
            "Timed out after 10000 ms waiting for element '#regusername'"
        );
    }

    #[test]
    fn test_validation_display() {
        let error = AppError::Validation {
            field: "account.username".to_string(),
            reason: "must not be empty".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Validation failed for account.username: must not be empty"
        );
    }

    #[test]
    fn test_anyhow_conversion_maps_to_internal() {
        let error: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(error, AppError::Internal { .. }));
    }

    #[test]
    fn test_config_validation_error_maps_to_validation() {
        let error: AppError = ConfigError::validation("site.login_url", "must be a URL").into();
        match error {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "site.login_url");
                assert_eq!(reason, "must be a URL");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}

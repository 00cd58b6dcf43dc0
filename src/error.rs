//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use account_api::{ApiBaseUrl, ConfigError};
//!
//! let result = ApiBaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Session secret cannot be empty.
    #[error("Session secret cannot be empty. Please provide the secret used to sign session tokens.")]
    EmptySessionSecret,

    /// API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme (e.g., 'http://localhost:8000').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Login path is invalid.
    #[error("Invalid login path '{path}'. The path must start with '/'.")]
    InvalidLoginPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// Session max age must be positive and within the calendar range.
    #[error("Session max age must be positive and within the calendar range, got {seconds} seconds.")]
    InvalidMaxAge {
        /// The rejected value in seconds.
        seconds: i64,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_secret_error_message() {
        let message = ConfigError::EmptySessionSecret.to_string();
        assert!(message.contains("Session secret cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "bad url!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad url!"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "session_secret",
        };
        let message = error.to_string();
        assert!(message.contains("session_secret"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptySessionSecret;
        let _: &dyn std::error::Error = &error;
    }
}

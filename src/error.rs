//! Error types and handling for the Locale service

use thiserror::Error;

/// Main error type for the Locale service
///
/// Expected upstream failures stay internal to the provider clients, which
/// convert them into their documented degraded values. These variants cross
/// component boundaries only for configuration and startup problems.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream provider transport or status errors
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Malformed provider response payloads
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl LocaleError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for LocaleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::parse(err.to_string())
        } else {
            Self::provider(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = LocaleError::config("missing API key");
        assert!(matches!(config_err, LocaleError::Config { .. }));

        let provider_err = LocaleError::provider("connection refused");
        assert!(matches!(provider_err, LocaleError::Provider { .. }));

        let parse_err = LocaleError::parse("unexpected payload");
        assert!(matches!(parse_err, LocaleError::Parse { .. }));

        let validation_err = LocaleError::validation("empty location");
        assert!(matches!(validation_err, LocaleError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LocaleError::provider("HTTP 500");
        assert_eq!(err.to_string(), "Provider error: HTTP 500");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let locale_err: LocaleError = io_err.into();
        assert!(matches!(locale_err, LocaleError::Io { .. }));
    }
}

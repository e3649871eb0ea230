//! Configuration management for the Locale service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::LocaleError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Locale service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocaleConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Google provider settings (geocoding and place search)
    #[serde(default)]
    pub google: GoogleConfig,
    /// Climate archive provider settings
    #[serde(default)]
    pub climate: ClimateConfig,
    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the API server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Google provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// API key sent with geocoding and place-search requests
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the geocoding endpoint
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Base URL of the places endpoints (searchNearby / searchText)
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,
}

/// Climate archive provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Base URL of the historical weather archive
    #[serde(default = "default_climate_base_url")]
    pub base_url: String,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds; a timed-out call degrades like any
    /// other transport failure
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_server_port() -> u16 {
    5001
}

fn default_geocoding_base_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_places_base_url() -> String {
    "https://places.googleapis.com/v1".to_string()
}

fn default_climate_base_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            geocoding_base_url: default_geocoding_base_url(),
            places_base_url: default_places_base_url(),
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            base_url: default_climate_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LocaleConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with LOCALE_ prefix,
        // e.g. LOCALE_GOOGLE__API_KEY, LOCALE_SERVER__PORT
        builder = builder.add_source(
            Environment::with_prefix("LOCALE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: LocaleConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // The original deployment configured the key through this variable
        if config.google.api_key.is_empty() {
            if let Ok(key) = std::env::var("GOOGLE_MAPS_API_KEY") {
                config.google.api_key = key;
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("locale").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the provider API key, when present
    ///
    /// An empty key is allowed so the server can start without one; every
    /// provider call will then degrade to its documented fallback value.
    pub fn validate_api_key(&self) -> Result<()> {
        if !self.google.api_key.is_empty() && self.google.api_key.len() < 8 {
            return Err(LocaleError::config(
                "Google API key appears to be invalid (too short). Please check your API key.",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 {
            return Err(LocaleError::config("HTTP timeout must be at least 1 second").into());
        }

        if self.http.timeout_seconds > 300 {
            return Err(LocaleError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(LocaleError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for url in [
            &self.google.geocoding_base_url,
            &self.google.places_base_url,
            &self.climate.base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(LocaleError::config(format!(
                    "Provider base URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocaleConfig::default();
        assert_eq!(config.server.port, 5001);
        assert_eq!(
            config.google.geocoding_base_url,
            "https://maps.googleapis.com/maps/api/geocode/json"
        );
        assert_eq!(
            config.google.places_base_url,
            "https://places.googleapis.com/v1"
        );
        assert_eq!(
            config.climate.base_url,
            "https://archive-api.open-meteo.com/v1/archive"
        );
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.google.api_key.is_empty());
    }

    #[test]
    fn test_default_config_validates() {
        let config = LocaleConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = LocaleConfig::default();
        config.google.api_key = "abc".to_string();
        let result = config.validate_api_key();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_valid_api_key() {
        let mut config = LocaleConfig::default();
        config.google.api_key = "valid_api_key_123".to_string();
        assert!(config.validate_api_key().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = LocaleConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = LocaleConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = LocaleConfig::default();
        config.climate.base_url = "ftp://archive.example".to_string();
        let result = config.validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = LocaleConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("locale"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}

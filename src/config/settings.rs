//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub polling: PollingConfig,
    pub fees: FeesConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Bearer token storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token_path: Option<PathBuf>,
    pub persist_token: bool,
}

/// Dashboard refresh intervals
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    pub activity_seconds: u64,
    pub dashboard_seconds: u64,
}

/// Client-side fee preview configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeesConfig {
    pub platform_fee_rate: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub report_errors: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("paytask")
    }

    /// Load settings from the given file (extension optional) and the environment
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("PAYTASK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PayTaskError> {
        super::validation::validate_settings(self)
    }

    /// Token file location, falling back to the user config directory
    pub fn token_path(&self) -> Option<PathBuf> {
        if !self.auth.persist_token {
            return None;
        }
        self.auth
            .token_path
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("paytask").join("token.json")))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            polling: PollingConfig::default(),
            fees: FeesConfig::default(),
            logging: LoggingConfig::default(),
            features: FeaturesConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 15,
            user_agent: format!("paytask-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_path: None,
            persist_token: true,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            activity_seconds: 5,
            dashboard_seconds: 30,
        }
    }
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            platform_fee_rate: 0.05,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_path: None,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            report_errors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.polling.activity_seconds, 5);
        assert_eq!(settings.polling.dashboard_seconds, 30);
        assert_eq!(settings.fees.platform_fee_rate, 0.05);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_token_path_disabled() {
        let mut settings = Settings::default();
        settings.auth.persist_token = false;
        settings.auth.token_path = Some(PathBuf::from("/tmp/token.json"));
        assert!(settings.token_path().is_none());

        settings.auth.persist_token = true;
        assert_eq!(settings.token_path(), Some(PathBuf::from("/tmp/token.json")));
    }
}

//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;

use crate::utils::errors::{PayTaskError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_polling_config(&settings.polling)?;
    validate_fees_config(&settings.fees)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(PayTaskError::Config(
            "API base URL is required".to_string()
        ));
    }

    let url = Url::parse(&config.base_url)
        .map_err(|e| PayTaskError::Config(format!("Invalid API base URL '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(PayTaskError::Config(
            format!("API base URL must be http or https, got {}", url.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(PayTaskError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate polling intervals
fn validate_polling_config(config: &super::PollingConfig) -> Result<()> {
    if config.activity_seconds == 0 || config.dashboard_seconds == 0 {
        return Err(PayTaskError::Config(
            "Polling intervals must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate fee configuration
fn validate_fees_config(config: &super::FeesConfig) -> Result<()> {
    if !(0.0..1.0).contains(&config.platform_fee_rate) {
        return Err(PayTaskError::Config(
            format!("Platform fee rate must be in [0, 1), got {}", config.platform_fee_rate)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PayTaskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PayTaskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

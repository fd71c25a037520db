//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the PayTask client.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::{PayTaskError, Result};

/// Initialize logging based on configuration
///
/// Console output goes to stderr so that page output on stdout stays clean.
/// The returned guard must be held until exit when a log file is configured.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| PayTaskError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let guard = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "paytask.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
                .try_init()
                .map_err(|e| PayTaskError::Config(format!("Failed to install logger: {}", e)))?;
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init()
                .map_err(|e| PayTaskError::Config(format!("Failed to install logger: {}", e)))?;
            None
        }
    };

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: Option<&str>, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log actions that are simulated locally instead of being sent to the backend
pub fn log_simulated_action(page: &str, action: &str, target: &str) {
    info!(
        page = page,
        action = action,
        target = target,
        "Simulated action, no request sent"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, err: &PayTaskError) {
    if err.is_recoverable() {
        warn!(api = api, error = %err, severity = %err.severity(), "API call failed");
    } else {
        error!(api = api, error = %err, severity = %err.severity(), "API call failed");
    }
}

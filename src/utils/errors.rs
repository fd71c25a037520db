//! Error handling for PayTask
//!
//! This module defines the main error types used throughout the client
//! and provides a unified error handling strategy.

use std::fmt;

use thiserror::Error;

/// Main error type for the PayTask client
#[derive(Error, Debug)]
pub enum PayTaskError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {error}")]
    Api { status: u16, error: ApiError },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Request timed out")]
    Timeout,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Error body returned by the backend inside a failed envelope.
///
/// When the body is not the envelope shape, `message` carries the raw
/// body and `code` is `UNKNOWN`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default = "ApiError::unknown_code")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    fn unknown_code() -> String {
        "UNKNOWN".to_string()
    }

    pub fn raw(body: impl Into<String>) -> Self {
        Self {
            message: body.into(),
            code: Self::unknown_code(),
            details: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// One failing form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All failing fields of a form, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Turn the collected errors into a result
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(PayTaskError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Result type alias for PayTask operations
pub type Result<T> = std::result::Result<T, PayTaskError>;

impl PayTaskError {
    /// Check if the error is recoverable
    ///
    /// Only used to pick a log level; nothing is retried.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PayTaskError::Http(_) => true,
            PayTaskError::Api { status, .. } => *status >= 500,
            PayTaskError::Unauthorized(_) => false,
            PayTaskError::Forbidden(_) => false,
            PayTaskError::NotFound { .. } => false,
            PayTaskError::Validation(_) => false,
            PayTaskError::Config(_) => false,
            PayTaskError::ConfigLoad(_) => false,
            PayTaskError::Serialization(_) => false,
            PayTaskError::Io(_) => true,
            PayTaskError::UrlParse(_) => false,
            PayTaskError::Timeout => true,
            PayTaskError::ServiceUnavailable(_) => true,
            PayTaskError::InvalidResponse(_) => false,
            PayTaskError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PayTaskError::Config(_) | PayTaskError::ConfigLoad(_) => ErrorSeverity::Critical,
            PayTaskError::Unauthorized(_) | PayTaskError::Forbidden(_) => ErrorSeverity::Warning,
            PayTaskError::Validation(_) | PayTaskError::InvalidInput(_) => ErrorSeverity::Info,
            PayTaskError::NotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Short message suitable for showing to a user
    pub fn user_message(&self) -> String {
        match self {
            PayTaskError::Api { error, .. } => error.message.clone(),
            PayTaskError::Unauthorized(_) => "Your session has expired. Please log in again.".to_string(),
            PayTaskError::Forbidden(message) => message.clone(),
            PayTaskError::Validation(errors) => format!("Please fix the following: {}", errors),
            PayTaskError::Timeout | PayTaskError::ServiceUnavailable(_) | PayTaskError::Http(_) => {
                "Could not reach PayTask. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            PayTaskError::Api { status, .. } => Some(*status),
            PayTaskError::Unauthorized(_) => Some(401),
            PayTaskError::Forbidden(_) => Some(403),
            _ => None,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_defaults_code() {
        let err: ApiError = serde_json::from_str(r#"{"message": "boom"}"#).unwrap();
        assert_eq!(err.code, "UNKNOWN");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_validation_errors_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("reward", "too low");
        errors.add("quantity", "too high");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: reward: too low; quantity: too high");
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_recoverability() {
        let server = PayTaskError::Api { status: 503, error: ApiError::raw("down") };
        let client = PayTaskError::Api { status: 400, error: ApiError::raw("bad") };
        assert!(server.is_recoverable());
        assert!(!client.is_recoverable());
        assert!(PayTaskError::Timeout.is_recoverable());
        assert_eq!(PayTaskError::Unauthorized("x".into()).status(), Some(401));
    }

    #[test]
    fn test_wrong_role_is_not_an_expired_session() {
        let err = PayTaskError::Forbidden("This page is for client accounts".into());
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.user_message(), "This page is for client accounts");
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(!err.is_recoverable());
    }
}

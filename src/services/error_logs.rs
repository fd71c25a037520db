//! Error log endpoints
//!
//! Clients may report their own failures; admins read them back.

use serde_json::json;
use tracing::debug;

use crate::models::{CreateErrorLogRequest, ErrorLog, LogLevel, Paginated};
use crate::services::client::ApiClient;
use crate::services::query::QueryBuilder;
use crate::utils::errors::{ErrorSeverity, PayTaskError, Result};

/// Service for `/errorlogs`
#[derive(Clone, Debug)]
pub struct ErrorLogService {
    client: ApiClient,
}

impl ErrorLogService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn report(&self, request: &CreateErrorLogRequest) -> Result<ErrorLog> {
        self.client.post("errorlogs", request).await
    }

    /// Report a client-side failure with the command it happened in
    pub async fn report_error(&self, err: &PayTaskError, command: &str) -> Result<ErrorLog> {
        let request = CreateErrorLogRequest {
            level: level_for(err.severity()),
            message: err.to_string(),
            stack: None,
            context: Some(json!({
                "command": command,
                "status": err.status(),
                "client": env!("CARGO_PKG_VERSION"),
            })),
        };
        debug!(command = command, "Reporting client error");
        self.report(&request).await
    }

    /// Admin listing, newest first
    pub async fn list(&self, level: Option<LogLevel>, page: u32, limit: u32) -> Result<Paginated<ErrorLog>> {
        let query = QueryBuilder::new()
            .push("level", level)
            .push("page", Some(page))
            .push("limit", Some(limit))
            .finish();
        self.client.get_with_query("errorlogs", &query).await
    }
}

fn level_for(severity: ErrorSeverity) -> LogLevel {
    match severity {
        ErrorSeverity::Info => LogLevel::Info,
        ErrorSeverity::Warning => LogLevel::Warn,
        ErrorSeverity::Error => LogLevel::Error,
        ErrorSeverity::Critical => LogLevel::Fatal,
    }
}

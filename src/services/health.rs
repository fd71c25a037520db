//! Backend health endpoint

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::services::client::ApiClient;
use crate::utils::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy")
    }
}

/// Health check result with the measured round trip
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub latency_ms: u128,
}

/// Service for `/health`
#[derive(Clone, Debug)]
pub struct HealthService {
    client: ApiClient,
}

impl HealthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> Result<HealthReport> {
        let started = Instant::now();
        let status: HealthStatus = self.client.public_get("health").await?;
        Ok(HealthReport {
            status,
            latency_ms: started.elapsed().as_millis(),
        })
    }
}

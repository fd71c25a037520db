//! Statistics endpoints

use crate::models::{ClientStats, PlatformStats, WorkerStats};
use crate::services::client::ApiClient;
use crate::utils::errors::Result;

/// Service for `/stats`
#[derive(Clone, Debug)]
pub struct StatsService {
    client: ApiClient,
}

impl StatsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn worker(&self) -> Result<WorkerStats> {
        self.client.get("stats/worker").await
    }

    pub async fn client(&self) -> Result<ClientStats> {
        self.client.get("stats/client").await
    }

    pub async fn platform(&self) -> Result<PlatformStats> {
        self.client.get("stats/platform").await
    }
}

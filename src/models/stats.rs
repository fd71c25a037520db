//! Server-side statistics models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerStats {
    pub total_earnings: f64,
    pub pending_earnings: f64,
    pub tasks_completed: u32,
    pub tasks_in_progress: u32,
    pub approval_rate: f64,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientStats {
    pub total_spent: f64,
    pub active_tasks: u32,
    pub completed_tasks: u32,
    pub pending_reviews: u32,
    pub escrow_balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_workers: u64,
    pub total_clients: u64,
    pub total_tasks: u64,
    pub active_tasks: u64,
    pub total_volume: f64,
    pub platform_revenue: f64,
    pub open_disputes: u64,
}

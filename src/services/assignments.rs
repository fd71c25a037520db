//! Assignment endpoints

use tracing::info;

use crate::models::{Assignment, AssignmentStatus, ClaimTaskRequest};
use crate::services::client::{segment, ApiClient};
use crate::services::query::QueryBuilder;
use crate::utils::errors::Result;

/// Service for `/assignments`
#[derive(Clone, Debug)]
pub struct AssignmentService {
    client: ApiClient,
}

impl AssignmentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Claim one unit of a task
    pub async fn claim(&self, task_id: &str) -> Result<Assignment> {
        let request = ClaimTaskRequest {
            task_id: task_id.to_string(),
        };
        let assignment: Assignment = self.client.post("assignments", &request).await?;
        info!(assignment_id = %assignment.id, task_id = task_id, "Task unit claimed");
        Ok(assignment)
    }

    /// Current user's assignments, optionally filtered by status
    pub async fn mine(&self, status: Option<AssignmentStatus>) -> Result<Vec<Assignment>> {
        let query = QueryBuilder::new().push("status", status).finish();
        self.client.get_with_query("assignments/my", &query).await
    }

    pub async fn get(&self, assignment_id: &str) -> Result<Assignment> {
        self.client.get(&format!("assignments/{}", segment(assignment_id))).await
    }

    /// Give the unit back to the pool
    pub async fn release(&self, assignment_id: &str) -> Result<Assignment> {
        let assignment: Assignment = self
            .client
            .post_empty(&format!("assignments/{}/release", segment(assignment_id)))
            .await?;
        info!(assignment_id = assignment_id, "Assignment released");
        Ok(assignment)
    }
}

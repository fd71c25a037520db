//! Task endpoints
//!
//! Task discovery, creation and the client-side lifecycle actions. The
//! lifecycle itself (who may publish, pause or cancel and what happens to
//! escrow) is enforced by the backend.

use tracing::{debug, info};

use crate::models::{CreateTaskRequest, Paginated, Task, UpdateTaskRequest};
use crate::services::client::{segment, ApiClient};
use crate::services::query::{build_task_query, TaskQuery};
use crate::utils::errors::Result;

/// Service for `/tasks`
#[derive(Clone, Debug)]
pub struct TaskService {
    client: ApiClient,
}

impl TaskService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List tasks matching the server-side filters
    pub async fn list(&self, query: &TaskQuery) -> Result<Paginated<Task>> {
        let query_string = build_task_query(query);
        debug!(query = %query_string, "Listing tasks");
        self.client.get_with_query("tasks", &query_string).await
    }

    /// Tasks posted by the current user
    pub async fn my_tasks(&self, query: &TaskQuery) -> Result<Paginated<Task>> {
        self.client.get_with_query("tasks/my", &build_task_query(query)).await
    }

    pub async fn get(&self, task_id: &str) -> Result<Task> {
        self.client.get(&format!("tasks/{}", segment(task_id))).await
    }

    /// Create a draft task
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<Task> {
        let task: Task = self.client.post("tasks", request).await?;
        info!(task_id = %task.id, reward = task.reward, quantity = task.quantity, "Task created");
        Ok(task)
    }

    /// Resubmit an edited copy
    pub async fn update(&self, task_id: &str, request: &UpdateTaskRequest) -> Result<Task> {
        let task: Task = self.client.put(&format!("tasks/{}", segment(task_id)), request).await?;
        info!(task_id = %task.id, "Task updated");
        Ok(task)
    }

    pub async fn delete(&self, task_id: &str) -> Result<()> {
        self.client.delete(&format!("tasks/{}", segment(task_id))).await?;
        info!(task_id = task_id, "Task deleted");
        Ok(())
    }

    /// Publish a draft; the backend moves the budget into escrow
    pub async fn publish(&self, task_id: &str) -> Result<Task> {
        self.transition(task_id, "publish").await
    }

    pub async fn pause(&self, task_id: &str) -> Result<Task> {
        self.transition(task_id, "pause").await
    }

    pub async fn cancel(&self, task_id: &str) -> Result<Task> {
        self.transition(task_id, "cancel").await
    }

    async fn transition(&self, task_id: &str, action: &str) -> Result<Task> {
        let task: Task = self
            .client
            .post_empty(&format!("tasks/{}/{}", segment(task_id), action))
            .await?;
        info!(task_id = %task.id, action = action, status = %task.status, "Task status changed");
        Ok(task)
    }
}

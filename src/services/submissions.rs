//! Submission endpoints

use tracing::info;

use crate::models::{ApproveSubmissionRequest, CreateSubmissionRequest, RejectSubmissionRequest, Submission, SubmissionStatus};
use crate::services::client::{segment, ApiClient};
use crate::services::query::QueryBuilder;
use crate::utils::errors::{PayTaskError, Result};

/// Service for `/submissions`
#[derive(Clone, Debug)]
pub struct SubmissionService {
    client: ApiClient,
}

impl SubmissionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Deliver work for an assignment
    pub async fn submit(&self, request: &CreateSubmissionRequest) -> Result<Submission> {
        if request.content.trim().is_empty() && request.attachments.is_empty() {
            return Err(PayTaskError::InvalidInput(
                "A submission needs content or at least one attachment".to_string(),
            ));
        }

        let submission: Submission = self.client.post("submissions", request).await?;
        info!(submission_id = %submission.id, assignment_id = %request.assignment_id, "Work submitted");
        Ok(submission)
    }

    /// Submissions for one of the current user's tasks
    pub async fn list_for_task(&self, task_id: &str, status: Option<SubmissionStatus>) -> Result<Vec<Submission>> {
        let query = QueryBuilder::new()
            .push("taskId", Some(task_id))
            .push("status", status)
            .finish();
        self.client.get_with_query("submissions", &query).await
    }

    /// Current worker's submissions
    pub async fn mine(&self) -> Result<Vec<Submission>> {
        self.client.get("submissions/my").await
    }

    pub async fn get(&self, submission_id: &str) -> Result<Submission> {
        self.client.get(&format!("submissions/{}", segment(submission_id))).await
    }

    pub async fn approve(&self, submission_id: &str, feedback: Option<String>) -> Result<Submission> {
        let request = ApproveSubmissionRequest { feedback };
        let submission: Submission = self
            .client
            .post(&format!("submissions/{}/approve", segment(submission_id)), &request)
            .await?;
        info!(submission_id = submission_id, "Submission approved");
        Ok(submission)
    }

    pub async fn reject(&self, submission_id: &str, reason: &str) -> Result<Submission> {
        if reason.trim().is_empty() {
            return Err(PayTaskError::InvalidInput("A rejection reason is required".to_string()));
        }

        let request = RejectSubmissionRequest {
            reason: reason.to_string(),
        };
        let submission: Submission = self
            .client
            .post(&format!("submissions/{}/reject", segment(submission_id)), &request)
            .await?;
        info!(submission_id = submission_id, "Submission rejected");
        Ok(submission)
    }
}

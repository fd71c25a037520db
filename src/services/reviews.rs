//! Review endpoints

use crate::models::{CreateReviewRequest, Review};
use crate::services::client::{segment, ApiClient};
use crate::services::ratings::check_score;
use crate::utils::errors::Result;

/// Service for `/reviews`
#[derive(Clone, Debug)]
pub struct ReviewService {
    client: ApiClient,
}

impl ReviewService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateReviewRequest) -> Result<Review> {
        check_score(request.rating)?;
        self.client.post("reviews", request).await
    }

    pub async fn for_user(&self, user_id: &str) -> Result<Vec<Review>> {
        self.client.get(&format!("reviews/user/{}", segment(user_id))).await
    }

    pub async fn for_task(&self, task_id: &str) -> Result<Vec<Review>> {
        self.client.get(&format!("reviews/task/{}", segment(task_id))).await
    }
}

//! Rating endpoints

use crate::models::{CreateRatingRequest, Rating};
use crate::services::client::{segment, ApiClient};
use crate::utils::errors::{PayTaskError, Result};

/// Service for `/ratings`
#[derive(Clone, Debug)]
pub struct RatingService {
    client: ApiClient,
}

impl RatingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateRatingRequest) -> Result<Rating> {
        check_score(request.score)?;
        self.client.post("ratings", request).await
    }

    pub async fn for_user(&self, user_id: &str) -> Result<Vec<Rating>> {
        self.client.get(&format!("ratings/user/{}", segment(user_id))).await
    }
}

/// Scores are whole stars from 1 to 5
pub(crate) fn check_score(score: u8) -> Result<()> {
    if (1..=5).contains(&score) {
        Ok(())
    } else {
        Err(PayTaskError::InvalidInput(format!("Score must be between 1 and 5, got {}", score)))
    }
}

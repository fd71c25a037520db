//! User endpoints

use tracing::info;

use crate::models::{Paginated, UpdateUserRequest, UserProfile, UserRole};
use crate::services::client::{segment, ApiClient};
use crate::services::query::QueryBuilder;
use crate::utils::errors::{PayTaskError, Result};

/// Service for `/users`
#[derive(Clone, Debug)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, user_id: &str) -> Result<UserProfile> {
        self.client.get(&format!("users/{}", segment(user_id))).await
    }

    /// Resubmit an edited copy of the current user's profile
    pub async fn update_me(&self, request: &UpdateUserRequest) -> Result<UserProfile> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(PayTaskError::InvalidInput("Name cannot be empty".to_string()));
            }
        }
        if let Some(bio) = &request.bio {
            if bio.chars().count() > 500 {
                return Err(PayTaskError::InvalidInput("Bio must be at most 500 characters".to_string()));
            }
        }

        let profile: UserProfile = self.client.put("users/me", request).await?;
        info!(user_id = %profile.id, "Profile updated");
        Ok(profile)
    }

    /// Admin user listing
    pub async fn list(&self, role: Option<UserRole>, search: Option<&str>, page: u32, limit: u32) -> Result<Paginated<UserProfile>> {
        let query = QueryBuilder::new()
            .push("role", role)
            .push("search", search)
            .push("page", Some(page))
            .push("limit", Some(limit))
            .finish();
        self.client.get_with_query("users", &query).await
    }
}

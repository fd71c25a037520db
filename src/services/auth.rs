//! Authentication endpoints

use tracing::{debug, info};

use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use crate::services::client::ApiClient;
use crate::utils::errors::{PayTaskError, Result};
use crate::utils::helpers::is_valid_email;

/// Service for `/auth`
#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        if !is_valid_email(email) {
            return Err(PayTaskError::InvalidInput(format!("'{}' is not a valid email address", email)));
        }
        if password.is_empty() {
            return Err(PayTaskError::InvalidInput("Password is required".to_string()));
        }

        debug!(email = email, "Logging in");
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.client.public_post("auth/login", &request).await?;
        info!(user_id = %response.user.id, role = %response.user.role, "Logged in");
        Ok(response)
    }

    /// Create an account and receive a bearer token
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        if !is_valid_email(&request.email) {
            return Err(PayTaskError::InvalidInput(format!("'{}' is not a valid email address", request.email)));
        }
        if request.password.chars().count() < 8 {
            return Err(PayTaskError::InvalidInput("Password must be at least 8 characters".to_string()));
        }
        if request.name.trim().is_empty() {
            return Err(PayTaskError::InvalidInput("Name is required".to_string()));
        }

        let response: AuthResponse = self.client.public_post("auth/register", request).await?;
        info!(user_id = %response.user.id, role = %response.user.role, "Registered new account");
        Ok(response)
    }

    /// Profile of the token holder
    pub async fn me(&self) -> Result<UserProfile> {
        self.client.get("auth/me").await
    }
}

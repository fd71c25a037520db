//! Authenticated session
//!
//! This module keeps the current user profile in memory next to the stored
//! bearer token and exposes login, logout and refetch.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::{RegisterRequest, UserProfile};
use crate::services::auth::AuthService;
use crate::state::TokenStorage;
use crate::utils::errors::{PayTaskError, Result};

/// Current user and token
#[derive(Clone, Debug)]
pub struct Session {
    auth: AuthService,
    tokens: TokenStorage,
    user: Arc<RwLock<Option<UserProfile>>>,
}

impl Session {
    pub fn new(auth: AuthService, tokens: TokenStorage) -> Self {
        Self {
            auth,
            tokens,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Log in and remember the token and profile
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let response = self.auth.login(email, password).await?;
        self.tokens.save(&response.token).await?;
        *self.user.write().await = Some(response.user.clone());
        Ok(response.user)
    }

    /// Register and remember the token and profile
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        let response = self.auth.register(request).await?;
        self.tokens.save(&response.token).await?;
        *self.user.write().await = Some(response.user.clone());
        Ok(response.user)
    }

    /// Forget the token and profile
    pub async fn logout(&self) -> Result<()> {
        self.tokens.clear().await?;
        *self.user.write().await = None;
        info!("Logged out");
        Ok(())
    }

    /// Reload the profile from `/auth/me`.
    ///
    /// Returns `None` without a request when no token is stored, and clears
    /// the session when the backend rejects the token.
    pub async fn refetch(&self) -> Result<Option<UserProfile>> {
        if self.tokens.current().await?.is_none() {
            debug!("No stored token, skipping profile fetch");
            *self.user.write().await = None;
            return Ok(None);
        }

        match self.auth.me().await {
            Ok(profile) => {
                *self.user.write().await = Some(profile.clone());
                Ok(Some(profile))
            }
            Err(PayTaskError::Unauthorized(message)) => {
                warn!(reason = %message, "Session is no longer valid");
                *self.user.write().await = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Cached profile, fetched on first use
    pub async fn current_user(&self) -> Result<Option<UserProfile>> {
        if let Some(user) = self.user.read().await.clone() {
            return Ok(Some(user));
        }
        self.refetch().await
    }

    /// Cached profile or an unauthorized error
    pub async fn require_user(&self) -> Result<UserProfile> {
        self.current_user()
            .await?
            .ok_or_else(|| PayTaskError::Unauthorized("Please log in first (paytask login)".to_string()))
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.tokens.current().await?.is_some())
    }
}

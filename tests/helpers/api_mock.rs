//! Mock PayTask backend for testing
//!
//! This module provides a mock HTTP server that speaks the PayTask response
//! envelope. It uses wiremock to create configurable mock responses.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use paytask::{ServiceFactory, Settings, TokenStorage};

use super::test_data::{create_test_user, test_token};

/// Mock PayTask backend for testing
pub struct PayTaskMockServer {
    pub server: MockServer,
    pub base_url: String,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            custom_response: None,
        }
    }
}

/// Successful envelope around `data`
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Failed envelope with an error code
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": { "message": message, "code": code }
    })
}

impl PayTaskMockServer {
    /// Start a new mock backend
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = format!("{}/api", server.uri());

        Self { server, base_url }
    }

    /// Settings pointing at this server, without token persistence
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = self.base_url.clone();
        settings.api.timeout_seconds = 5;
        settings.auth.persist_token = false;
        settings
    }

    /// Services wired to this server with in-memory token storage
    pub fn services(&self) -> ServiceFactory {
        self.services_with(TokenStorage::in_memory())
    }

    pub fn services_with(&self, tokens: TokenStorage) -> ServiceFactory {
        ServiceFactory::with_tokens(self.settings(), tokens).expect("Failed to build services")
    }

    /// Mount an envelope response for `verb` on `/api/{route}`
    pub async fn mock_envelope(&self, verb: &str, route: &str, data: Value, config: MockResponseConfig) {
        let (status, body) = match config.custom_response {
            Some(body) => (200, body),
            None if config.success => (200, envelope(data)),
            None => (400, error_envelope("BAD_REQUEST", "Request failed")),
        };

        let mut template = ResponseTemplate::new(status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            template = template.set_delay(Duration::from_millis(delay));
        }

        Mock::given(method(verb))
            .and(path(format!("/api/{}", route)))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// Mount a successful envelope response
    pub async fn mock_ok(&self, verb: &str, route: &str, data: Value) {
        self.mock_envelope(verb, route, data, MockResponseConfig::default()).await;
    }

    /// Mount a failed envelope with the given HTTP status
    pub async fn mock_error(&self, verb: &str, route: &str, status: u16, code: &str, message: &str) {
        Mock::given(method(verb))
            .and(path(format!("/api/{}", route)))
            .respond_with(ResponseTemplate::new(status).set_body_json(error_envelope(code, message)))
            .mount(&self.server)
            .await;
    }

    /// Mount a raw, non-envelope body
    pub async fn mock_raw(&self, verb: &str, route: &str, status: u16, body: &str) {
        Mock::given(method(verb))
            .and(path(format!("/api/{}", route)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
            .mount(&self.server)
            .await;
    }

    /// Mount `/auth/login` returning the token and user
    pub async fn mock_login(&self, token: &str, user: Value) {
        self.mock_ok("POST", "auth/login", json!({ "token": token, "user": user })).await;
    }

    /// Mount `/auth/me` returning the user
    pub async fn mock_me(&self, user: Value) {
        self.mock_ok("GET", "auth/me", user).await;
    }

    /// Mount `/auth/me` rejecting the token
    pub async fn mock_unauthorized(&self) {
        self.mock_error("GET", "auth/me", 401, "UNAUTHORIZED", "Invalid token").await;
    }

    /// Services with a stored token whose `/auth/me` returns a user of `role`
    pub async fn signed_in(&self, user_id: &str, role: &str) -> ServiceFactory {
        self.mock_me(create_test_user(user_id, role)).await;
        let tokens = TokenStorage::in_memory();
        tokens.save(test_token()).await.expect("Failed to store test token");
        self.services_with(tokens)
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Requests received for `/api/{route}`
    pub async fn requests_to(&self, route: &str) -> Vec<Request> {
        let target = format!("/api/{}", route);
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.url.path() == target)
            .collect()
    }
}

/// Value of the `Authorization` header, if sent
pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

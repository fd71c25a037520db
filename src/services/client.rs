//! PayTask backend HTTP client
//!
//! This module wraps `reqwest` with the conventions every backend call shares:
//! base URL joining, JSON headers, a per-request id, bearer authentication,
//! envelope decoding and error mapping. A 401 response clears the stored
//! token. Nothing is retried.

use std::time::Duration;

use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::Settings;
use crate::models::Envelope;
use crate::state::TokenStorage;
use crate::utils::errors::{ApiError, PayTaskError, Result};
use crate::utils::helpers::generate_request_id;

/// Header carrying the client-generated request id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Whether a request carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Bearer,
}

/// Shared HTTP client for all resource services
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: TokenStorage,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(settings: &Settings, tokens: TokenStorage) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .user_agent(settings.api.user_agent.clone())
            .build()
            .map_err(PayTaskError::Http)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&settings.api.base_url)?,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStorage {
        &self.tokens
    }

    /// Resolve a resource path against the base URL
    pub fn url(&self, path: &str, query: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        match query {
            Some(q) if !q.is_empty() => url.set_query(Some(q)),
            _ => {}
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None, Access::Bearer, None::<&()>).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &str) -> Result<T> {
        self.send(Method::GET, path, Some(query), Access::Bearer, None::<&()>).await
    }

    pub async fn public_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None, Access::Public, None::<&()>).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::POST, path, None, Access::Bearer, Some(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::POST, path, None, Access::Bearer, None::<&()>).await
    }

    pub async fn public_post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::POST, path, None, Access::Public, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::PUT, path, None, Access::Bearer, Some(body)).await
    }

    /// DELETE a resource; the response data is ignored
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path, None)?;
        let request_id = generate_request_id();
        let builder = self.builder(Method::DELETE, url, Access::Bearer, &request_id).await?;
        self.execute::<serde_json::Value>(builder, "DELETE", path, &request_id)
            .await
            .map(|_| ())
    }

    /// POST a multipart form
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, form: multipart::Form) -> Result<T> {
        let url = self.url(path, None)?;
        let request_id = generate_request_id();
        let builder = self
            .builder(Method::POST, url, Access::Bearer, &request_id)
            .await?
            .multipart(form);
        self.execute::<T>(builder, "POST", path, &request_id)
            .await?
            .ok_or_else(|| PayTaskError::InvalidResponse(format!("POST {} returned no data", path)))
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        access: Access,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.url(path, query)?;
        let request_id = generate_request_id();
        let method_name = method.as_str().to_string();

        let mut builder = self.builder(method, url, access, &request_id).await?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        self.execute::<T>(builder, &method_name, path, &request_id)
            .await?
            .ok_or_else(|| PayTaskError::InvalidResponse(format!("{} {} returned no data", method_name, path)))
    }

    async fn builder(&self, method: Method, url: Url, access: Access, request_id: &str) -> Result<RequestBuilder> {
        let mut builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id);

        if access == Access::Bearer {
            if let Some(token) = self.tokens.current().await? {
                builder = builder.bearer_auth(token);
            }
        }

        Ok(builder)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &str,
        path: &str,
        request_id: &str,
    ) -> Result<Option<T>> {
        debug!(method = method, path = path, request_id = request_id, "Sending API request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PayTaskError::Timeout
            } else if e.is_connect() {
                PayTaskError::ServiceUnavailable(e.to_string())
            } else {
                PayTaskError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(PayTaskError::Http)?;
        debug!(method = method, path = path, request_id = request_id, status = status.as_u16(), "API response received");

        if status == StatusCode::UNAUTHORIZED {
            warn!(path = path, "Backend rejected the bearer token, clearing it");
            self.tokens.clear().await?;
            return Err(PayTaskError::Unauthorized(parse_error_body(&body).message));
        }

        if !status.is_success() {
            let error = parse_error_body(&body);
            warn!(method = method, path = path, status = status.as_u16(), code = %error.code, "API request failed");
            return Err(PayTaskError::Api {
                status: status.as_u16(),
                error,
            });
        }

        decode_envelope(status, &body)
    }
}

/// Decode a successful response body into its `data` payload
pub fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| PayTaskError::InvalidResponse(format!("Unexpected response body: {}", e)))?;

    if !envelope.success {
        let error = envelope
            .error
            .unwrap_or_else(|| ApiError::raw(envelope.message.unwrap_or_else(|| "Request failed".to_string())));
        return Err(PayTaskError::Api {
            status: status.as_u16(),
            error,
        });
    }

    Ok(envelope.data)
}

/// Extract the error from a failed response body, keeping the raw body when
/// it is not an envelope
pub fn parse_error_body(body: &str) -> ApiError {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(Envelope { error: Some(error), .. }) => error,
        Ok(Envelope { message: Some(message), .. }) => ApiError::raw(message),
        _ => ApiError::raw(body.to_string()),
    }
}

/// Ensure the base URL ends with a slash so relative joins keep its path
fn normalize_base_url(base: &str) -> Result<Url> {
    let with_slash = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    Ok(Url::parse(&with_slash)?)
}

/// Percent-encode an id for use as a path segment
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let mut settings = Settings::default();
        settings.api.base_url = base.to_string();
        ApiClient::new(&settings, TokenStorage::in_memory()).unwrap()
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = client("https://api.paytask.io/api");
        assert_eq!(client.url("/tasks", None).unwrap().as_str(), "https://api.paytask.io/api/tasks");
        assert_eq!(
            client.url("tasks", Some("status=active&page=2")).unwrap().as_str(),
            "https://api.paytask.io/api/tasks?status=active&page=2"
        );
        assert_eq!(client.url("health", Some("")).unwrap().as_str(), "https://api.paytask.io/api/health");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("abc-123"), "abc-123");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_parse_error_body() {
        let err = parse_error_body(r#"{"success": false, "error": {"message": "Insufficient balance", "code": "INSUFFICIENT_FUNDS", "details": {"needed": 21}}}"#);
        assert_eq!(err.code, "INSUFFICIENT_FUNDS");
        assert_eq!(err.details.unwrap()["needed"], 21);

        let raw = parse_error_body("<html>502 Bad Gateway</html>");
        assert_eq!(raw.code, "UNKNOWN");
        assert_eq!(raw.message, "<html>502 Bad Gateway</html>");

        let message_only = parse_error_body(r#"{"success": false, "message": "Task is full"}"#);
        assert_eq!(message_only.message, "Task is full");
    }

    #[test]
    fn test_decode_envelope() {
        let data: Option<u32> = decode_envelope(StatusCode::OK, r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(data, Some(7));

        let empty: Option<u32> = decode_envelope(StatusCode::NO_CONTENT, "").unwrap();
        assert_eq!(empty, None);

        let failed = decode_envelope::<u32>(StatusCode::OK, r#"{"success": false, "error": {"message": "nope", "code": "X"}}"#);
        assert!(matches!(failed, Err(PayTaskError::Api { status: 200, .. })));
    }
}

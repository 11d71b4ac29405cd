//! API client for the bassinet vendor's cloud service.
//!
//! This module provides the `DeviceClient` struct for the one-shot login
//! exchange and for issuing authenticated device commands. The wire shapes
//! belong to the vendor's mobile app; only the two endpoints this utility
//! needs are modeled.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::debug;

use crate::auth::SessionData;
use crate::dispatch::Action;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the vendor cloud API.
const DEFAULT_API_BASE_URL: &str = "https://api-us-east-1-prod.happiestbaby.com";

/// Path of the login endpoint (accepts username/password, returns a token).
const LOGIN_PATH: &str = "/us/login";

/// Path of the device command endpoint.
const COMMAND_PATH: &str = "/us/me/devices/commands";

/// HTTP request timeout in seconds.
/// Button presses should fail fast enough that the user can retry by
/// pressing again, while still tolerating a slow cloud round trip.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Only the token matters; the login response's other fields (expiry,
/// token type, device list) are ignored since there is no refresh path.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
}

/// API client for the vendor service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl DeviceClient {
    /// Create a new client. `base_url` overrides the production URL,
    /// mainly for pointing at a local test endpoint.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            token: None,
        })
    }

    /// Create a new DeviceClient with the given token, sharing the
    /// connection pool of this one.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    /// Exchange credentials for a session token. Called exactly once at
    /// startup; any failure here is fatal for the process.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SessionData> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;

        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;

        debug!(username, "Login succeeded");

        Ok(SessionData::new(auth.access_token, username.to_string()))
    }

    /// Issue one authenticated command request. Exactly one HTTP call per
    /// invocation; the caller decides what to do with a failure (here:
    /// log it and keep serving button presses).
    pub async fn send_command(&self, action: Action) -> Result<()> {
        let url = format!("{}{}", self.base_url, COMMAND_PATH);

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(&serde_json::json!({ "command": action.command() }))
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to send {} command", action.command()))?;

        Self::check_response(response).await?;
        debug!(command = action.command(), "Command accepted");
        Ok(())
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_response() {
        // Extra vendor fields must not break parsing.
        let json = r#"{"access_token": "T123", "expires_in": 1800, "token_type": "bearer"}"#;
        let auth: AuthResponse = serde_json::from_str(json).expect("auth response should parse");
        assert_eq!(auth.access_token, "T123");
    }

    #[test]
    fn test_bearer_header_carries_token() {
        let client = DeviceClient::new(None)
            .expect("client should build")
            .with_token("T123".to_string());
        let headers = client.auth_headers().expect("headers should build");
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer T123"
        );
    }

    #[test]
    fn test_no_header_without_token() {
        let client = DeviceClient::new(None).expect("client should build");
        let headers = client.auth_headers().expect("headers should build");
        assert!(headers.get(header::AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_network_error() {
        // Port 9 (discard) has no listener, so the connect is refused
        // without leaving the machine.
        let client = DeviceClient::new(Some("http://127.0.0.1:9".to_string()))
            .expect("client should build")
            .with_token("T123".to_string());

        let err = client
            .send_command(Action::Toggle)
            .await
            .expect_err("connection must fail");
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NetworkError(_))
        ));
    }

    #[test]
    fn test_base_url_override() {
        let client = DeviceClient::new(Some("http://127.0.0.1:8080".to_string()))
            .expect("client should build");
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }
}

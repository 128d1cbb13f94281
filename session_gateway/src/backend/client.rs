use std::time::Duration;

use serde_json::{Value, json};
use url::Url;

use super::config::{BACKEND_TIMEOUT_SECS, BACKEND_URL};
use super::errors::BackendError;
use super::types::{ProxyResponse, SignupPayload, SocialLoginPayload};

/// HTTP client for the backend identity service.
///
/// Thin and stateless: every operation is an independent outbound call with
/// a bounded timeout, returning the backend's status and JSON body for the
/// proxy layer to translate or pass through.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

/// Creates a configured HTTP client for backend calls:
///
/// - `timeout`: bounded (default 8s) so a slow backend surfaces as an
///   ordinary failure instead of a hang.
///
/// - `pool_idle_timeout` / `pool_max_idle_per_host`: defaults that balance
///   concurrent proxy traffic against memory use.
fn get_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(*BACKEND_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .expect("Failed to create reqwest client")
}

impl BackendClient {
    /// Client against the `BACKEND_URL` from the environment.
    pub fn new() -> Self {
        Self::with_base_url(BACKEND_URL.as_str())
    }

    /// Client against an explicit base URL (used by tests and demos).
    pub fn with_base_url(base_url: &str) -> Self {
        Url::parse(base_url).expect("Invalid backend base URL");
        Self {
            http: get_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Forward an OTP-issuance login request verbatim.
    pub async fn login_start(&self, body: &Value) -> Result<ProxyResponse, BackendError> {
        self.post("/api/mobile/login", body).await
    }

    pub async fn signup(&self, payload: &SignupPayload) -> Result<ProxyResponse, BackendError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        self.post("/api/mobile/signup", &body).await
    }

    pub async fn social_login(
        &self,
        payload: &SocialLoginPayload,
    ) -> Result<ProxyResponse, BackendError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        self.post("/api/mobile/social-login", &body).await
    }

    pub async fn token_refresh(&self, refresh_token: &str) -> Result<ProxyResponse, BackendError> {
        self.post("/api/mobile/token/refresh", &json!({ "refresh": refresh_token }))
            .await
    }

    /// Identity lookup with a bearer token, falling back to a forwarded
    /// cookie header when no access token is at hand.
    pub async fn whoami(
        &self,
        access_token: Option<&str>,
        cookie_header: Option<&str>,
    ) -> Result<ProxyResponse, BackendError> {
        let mut request = self.http.get(format!("{}/api/mobile/me", self.base_url));
        match (access_token, cookie_header) {
            (Some(token), _) => {
                request = request.bearer_auth(token);
            }
            (None, Some(cookies)) => {
                request = request.header(http::header::COOKIE, cookies);
            }
            (None, None) => {}
        }
        let response = request.send().await?;
        Self::read_response(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ProxyResponse, BackendError> {
        tracing::debug!("POST {}{}", self.base_url, path);
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::read_response(response).await
    }

    /// Read status and body. 2xx bodies must be JSON; error bodies parse
    /// leniently so status-driven handling (cookie clearing, conflict
    /// mapping) still proceeds when the backend answers with non-JSON.
    async fn read_response(response: reqwest::Response) -> Result<ProxyResponse, BackendError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            json!({})
        } else if status.is_success() {
            serde_json::from_slice(&bytes).map_err(|e| BackendError::Parse(e.to_string()))?
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Non-JSON error body from backend ({status}): {e}");
                json!({})
            })
        };

        Ok(ProxyResponse { status, body })
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new()
    }
}

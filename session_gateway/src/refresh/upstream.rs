use std::time::Duration;

use async_trait::async_trait;

use crate::config::SG_ROUTE_PREFIX;

use super::config::ORIGIN;
use super::errors::RefreshError;

/// The single upstream call a refresh flight performs.
///
/// `session_key` is the opaque per-browser key the coordinator dedups on;
/// implementations resolve it to whatever credential context the refresh
/// endpoint needs.
#[async_trait]
pub trait RefreshUpstream: Send + Sync {
    async fn refresh(&self, session_key: &str) -> Result<(), RefreshError>;
}

/// Refresh via a same-origin HTTP call to the gateway's own refresh
/// endpoint, forwarding the session key as the Cookie header so the endpoint
/// sees the browser's refresh cookie.
#[derive(Debug, Clone)]
pub struct HttpRefreshUpstream {
    http: reqwest::Client,
    refresh_url: String,
}

impl HttpRefreshUpstream {
    pub fn new(origin: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(8))
                .build()
                .expect("Failed to create reqwest client"),
            refresh_url: format!(
                "{}{}/refresh",
                origin.trim_end_matches('/'),
                SG_ROUTE_PREFIX.as_str()
            ),
        }
    }

    /// Upstream against the `ORIGIN` from the environment.
    pub fn from_env() -> Self {
        Self::new(ORIGIN.as_str())
    }
}

#[async_trait]
impl RefreshUpstream for HttpRefreshUpstream {
    async fn refresh(&self, session_key: &str) -> Result<(), RefreshError> {
        let response = self
            .http
            .post(&self.refresh_url)
            .header(http::header::COOKIE, session_key)
            .send()
            .await
            .map_err(|e| RefreshError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::debug!("Refresh endpoint answered {status}");
            Err(RefreshError::Rejected(status.as_u16()))
        }
    }
}

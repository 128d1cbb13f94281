use std::sync::LazyLock;

use http::StatusCode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::TokenPair;

/// Conflict message marker used by the backend when an identity exists.
static ALREADY_EXISTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)already\s*exists").expect("Invalid conflict pattern"));

/// Payload for the backend signup operation.
#[derive(Debug, Clone, Serialize)]
pub struct SignupPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub full_name: String,
}

/// Payload for the backend social-login operation. Deserializable because
/// the proxy endpoint accepts the same shape it forwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLoginPayload {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// A backend response held for translation or verbatim pass-through.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProxyResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Extract a credential pair when the body carries one. A pair needs at
    /// least the access half; see [`token_field`](Self::token_field) for the
    /// halves independently.
    pub fn tokens(&self) -> Option<TokenPair> {
        let access = self.token_field("access")?;
        Some(TokenPair {
            access: access.to_string(),
            refresh: self.token_field("refresh").map(|v| v.to_string()),
        })
    }

    /// A single credential field from the body; empty values are absent.
    pub fn token_field(&self, name: &str) -> Option<&str> {
        self.body
            .get(name)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Not-found is signaled either by HTTP 404 or a body marker.
    pub fn indicates_user_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
            || self.body.get("status").and_then(|v| v.as_str()) == Some("USER_NOT_FOUND")
    }

    /// Conflict is signaled by HTTP 409, a body marker, or a message match.
    pub fn indicates_conflict(&self) -> bool {
        self.status == StatusCode::CONFLICT
            || self.body.get("status").and_then(|v| v.as_str()) == Some("ALREADY_EXISTS")
            || self
                .message()
                .is_some_and(|msg| ALREADY_EXISTS_RE.is_match(&msg))
    }

    pub fn message(&self) -> Option<String> {
        self.body
            .get("message")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    pub fn user(&self) -> Option<Value> {
        self.body.get("user").cloned()
    }
}

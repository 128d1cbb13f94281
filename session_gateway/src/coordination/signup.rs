use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::backend::{BackendClient, SignupPayload};

use super::errors::CoordinationError;

// Simple RFC-ish email check; real validation belongs to the backend.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

// Permissive phone check: digits, +, -, spaces, parentheses.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\+\-\s\(\)]+$").expect("Invalid phone pattern"));

/// Signup request as accepted by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "name")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    Created { user: Option<Value> },
    AlreadyExists,
}

/// Validate a signup request locally, then forward it to the backend.
///
/// Validation failures never reach the backend. A backend conflict (status
/// code, body marker, or message match) maps to the canonical
/// [`SignupOutcome::AlreadyExists`] so callers can offer "please log in".
pub async fn signup_core(
    client: &BackendClient,
    request: &SignupRequest,
) -> Result<SignupOutcome, CoordinationError> {
    let email = request.email.as_deref().unwrap_or("").trim();
    let phone = request.phone.as_deref().unwrap_or("").trim();
    let full_name = request.full_name.as_deref().unwrap_or("User").trim();

    if email.is_empty() && phone.is_empty() {
        return Err(
            CoordinationError::Validation("Either email or phone is required.".to_string()).log(),
        );
    }
    if !email.is_empty() && !EMAIL_RE.is_match(email) {
        return Err(CoordinationError::Validation("Invalid email format.".to_string()).log());
    }
    if !phone.is_empty() && !PHONE_RE.is_match(phone) {
        return Err(CoordinationError::Validation("Invalid phone format.".to_string()).log());
    }

    let payload = SignupPayload {
        email: (!email.is_empty()).then(|| email.to_string()),
        phone: (!phone.is_empty()).then(|| phone.to_string()),
        full_name: full_name.to_string(),
    };

    let response = client.signup(&payload).await?;

    if response.indicates_conflict() {
        tracing::debug!("Signup conflict for an existing identity");
        return Ok(SignupOutcome::AlreadyExists);
    }

    if !response.is_success() {
        return Err(CoordinationError::Upstream {
            status: response.status,
            body: response.body,
        }
        .log());
    }

    Ok(SignupOutcome::Created {
        user: response.user(),
    })
}

//! Identity bootstrap at social sign-in.
//!
//! Invoked when a third-party identity provider has confirmed a user. The
//! backend does not tell us up front whether that identity is known, so the
//! orchestrator runs a fixed fallback chain: login, then signup for unknown
//! users, then login again. Every terminal state other than "credentials
//! obtained" denies the sign-in without touching any cookie.

use http::HeaderMap;

use crate::backend::{BackendClient, SignupPayload, SocialLoginPayload};
use crate::session::session_rotation_headers;

use super::errors::CoordinationError;

const DEFAULT_DISPLAY_NAME: &str = "User";

/// A confirmed third-party identity, as handed over by the provider
/// callback. Email is required; everything else is best-effort.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    pub email: String,
    pub full_name: Option<String>,
    pub provider: Option<String>,
}

/// Produce session cookies for a confirmed identity, or fail closed.
///
/// On success the returned headers carry the full cookie rotation; on any
/// failure no cookie header is produced and the caller must deny the
/// sign-in. Signup error detail stays in the logs.
pub async fn bootstrap_social_signin(
    client: &BackendClient,
    identity: &ProviderIdentity,
) -> Result<HeaderMap, CoordinationError> {
    let email = identity.email.trim();
    if email.is_empty() {
        tracing::error!("No email provided by identity provider");
        return Err(CoordinationError::SigninDenied);
    }

    // First, try to login
    let login = client
        .social_login(&SocialLoginPayload {
            email: email.to_string(),
            full_name: None,
            provider: None,
        })
        .await?;

    if login.is_success() {
        if let Some(pair) = login.tokens() {
            tracing::debug!("Known identity; session established");
            return Ok(session_rotation_headers(&pair)?);
        }
    }

    // Not-found can arrive as a 404 or as a body marker on any status; both
    // mean the identity must be registered first. Anything else, including a
    // 2xx that carried neither credentials nor a marker, denies the sign-in.
    if !login.indicates_user_not_found() {
        tracing::error!("Login yielded no credentials ({})", login.status);
        return Err(CoordinationError::SigninDenied);
    }

    // Unknown identity: register it, then login again
    let signup = client
        .signup(&SignupPayload {
            email: Some(email.to_string()),
            phone: None,
            full_name: identity
                .full_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        })
        .await?;

    if !signup.is_success() {
        tracing::error!(
            "Signup failed during bootstrap ({}): {:?}",
            signup.status,
            signup.message()
        );
        return Err(CoordinationError::SigninDenied);
    }

    let login = client
        .social_login(&SocialLoginPayload {
            email: email.to_string(),
            full_name: identity.full_name.clone(),
            provider: identity.provider.clone(),
        })
        .await?;

    if login.is_success() {
        if let Some(pair) = login.tokens() {
            tracing::debug!("Identity registered; session established");
            return Ok(session_rotation_headers(&pair)?);
        }
    }

    tracing::error!("Login after signup failed with {}", login.status);
    Err(CoordinationError::SigninDenied)
}

use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::backend::BackendClient;
use crate::session::{Session, TokenPair, clear_session_headers, session_rotation_headers};

use super::errors::CoordinationError;

/// Outcome of a refresh round-trip. Both variants carry the Set-Cookie
/// headers the response must apply.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Backend accepted the refresh token; cookies rotated with fixed
    /// lifetimes. `pair` is absent when the backend answered 2xx without
    /// credentials, in which case nothing was rotated.
    Rotated {
        headers: HeaderMap,
        pair: Option<TokenPair>,
    },
    /// Backend rejected the refresh token. Both cookies are cleared so the
    /// browser re-authenticates instead of retry-looping; status and body
    /// pass through.
    Failed {
        headers: HeaderMap,
        status: StatusCode,
        body: Value,
    },
}

/// Rotate the session against the backend.
///
/// Fails with `Unauthorized` before any backend call when the session holds
/// no refresh token.
pub async fn refresh_core(
    client: &BackendClient,
    session: &Session,
) -> Result<RefreshOutcome, CoordinationError> {
    let Some(refresh_token) = session.refresh_token() else {
        return Err(CoordinationError::Unauthorized.log());
    };

    let response = client.token_refresh(refresh_token).await?;

    if !response.is_success() {
        tracing::debug!("Refresh rejected ({}); clearing session", response.status);
        return Ok(RefreshOutcome::Failed {
            headers: clear_session_headers()?,
            status: response.status,
            body: response.body,
        });
    }

    match response.tokens() {
        Some(pair) => Ok(RefreshOutcome::Rotated {
            headers: session_rotation_headers(&pair)?,
            pair: Some(pair),
        }),
        None => {
            tracing::warn!("Refresh succeeded without credentials in the body");
            Ok(RefreshOutcome::Rotated {
                headers: HeaderMap::new(),
                pair: None,
            })
        }
    }
}

/// Headers ending the session. Succeeds without any backend call.
pub fn logout_headers() -> Result<HeaderMap, CoordinationError> {
    Ok(clear_session_headers()?)
}

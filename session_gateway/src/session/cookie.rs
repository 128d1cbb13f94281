use http::HeaderMap;

use crate::utils::header_set_cookie;

use super::config::{
    ACCESS_COOKIE_MAX_AGE, ACCESS_COOKIE_NAME, REFRESH_COOKIE_MAX_AGE, REFRESH_COOKIE_NAME,
    SECURE_COOKIES,
};
use super::errors::SessionError;
use super::types::TokenPair;

/// Build Set-Cookie headers persisting a credential pair.
///
/// Sets only what the backend returned: when the pair carries no refresh
/// token, the browser's refresh cookie is left untouched.
pub fn session_rotation_headers(pair: &TokenPair) -> Result<HeaderMap, SessionError> {
    session_credential_headers(Some(&pair.access), pair.refresh.as_deref())
}

/// Build Set-Cookie headers for whichever credentials are present, each
/// cookie independently. Pass-through endpoints use this directly since the
/// backend may rotate only one half of the pair.
pub fn session_credential_headers(
    access: Option<&str>,
    refresh: Option<&str>,
) -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    if let Some(access) = access {
        header_set_cookie(
            &mut headers,
            ACCESS_COOKIE_NAME.as_str(),
            access,
            *ACCESS_COOKIE_MAX_AGE as i64,
            *SECURE_COOKIES,
        )?;
    }
    if let Some(refresh) = refresh {
        header_set_cookie(
            &mut headers,
            REFRESH_COOKIE_NAME.as_str(),
            refresh,
            *REFRESH_COOKIE_MAX_AGE as i64,
            *SECURE_COOKIES,
        )?;
    }
    tracing::debug!(
        "Set session cookies (access: {}, refresh: {})",
        access.is_some(),
        refresh.is_some()
    );
    Ok(headers)
}

/// Build Set-Cookie headers expiring both session cookies.
pub fn clear_session_headers() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    for name in [ACCESS_COOKIE_NAME.as_str(), REFRESH_COOKIE_NAME.as_str()] {
        header_set_cookie(&mut headers, name, "", -86400, *SECURE_COOKIES)?;
    }
    tracing::debug!("Cleared session cookies");
    Ok(headers)
}

use http::header::{HeaderMap, SET_COOKIE};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Cookie error: {0}")]
    Cookie(String),
}

/// Append a Set-Cookie header for an HTTP-only, lax, root-scoped cookie.
///
/// A negative `max_age` expires the cookie. The `Secure` attribute is
/// controlled by the caller so local development over plain HTTP keeps
/// working.
pub(crate) fn header_set_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    max_age: i64,
    secure: bool,
) -> Result<(), UtilError> {
    let secure_attr = if secure { " Secure;" } else { "" };
    let cookie =
        format!("{name}={value}; SameSite=Lax;{secure_attr} HttpOnly; Path=/; Max-Age={max_age}");
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(())
}

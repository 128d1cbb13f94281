use http::header::{COOKIE, HeaderMap};

use super::config::{ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};

/// A credential pair as returned by the backend identity service.
///
/// The refresh half is optional: some login responses only rotate the access
/// token and leave the browser's refresh cookie untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: Option<String>,
}

/// The browser-held session, as read from the request cookies.
///
/// Both tokens are opaque. Application code should reach for the presence
/// predicates; the raw values only flow into the backend client.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    access: Option<String>,
    refresh: Option<String>,
}

impl Session {
    /// Parse the session out of a raw `Cookie` header value.
    pub fn from_cookie_header(cookie_header: Option<&str>) -> Self {
        let Some(cookie_str) = cookie_header else {
            return Self::default();
        };

        let mut session = Self::default();
        for part in cookie_str.split(';').map(|s| s.trim()) {
            let mut parts = part.splitn(2, '=');
            let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            if name == ACCESS_COOKIE_NAME.as_str() {
                session.access = Some(value.to_string());
            } else if name == REFRESH_COOKIE_NAME.as_str() {
                session.refresh = Some(value.to_string());
            }
        }
        session
    }

    /// Parse the session out of the request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookie_header = headers.get(COOKIE).and_then(|h| h.to_str().ok());
        if cookie_header.is_none() {
            tracing::debug!("No cookie header found");
        }
        Self::from_cookie_header(cookie_header)
    }

    /// Parse the session out of a typed `Cookie` header.
    pub fn from_cookie(cookies: &headers::Cookie) -> Self {
        Self {
            access: cookies
                .get(ACCESS_COOKIE_NAME.as_str())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string()),
            refresh: cookies
                .get(REFRESH_COOKIE_NAME.as_str())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string()),
        }
    }

    /// A syntactically present access credential. Says nothing about expiry;
    /// that is discovered reactively on the first failing request.
    pub fn has_access(&self) -> bool {
        self.access.is_some()
    }

    /// Whether a refresh attempt is possible at all.
    pub fn can_refresh(&self) -> bool {
        self.refresh.is_some()
    }

    pub fn is_anonymous(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }

    pub(crate) fn access_token(&self) -> Option<&str> {
        self.access.as_deref()
    }

    pub(crate) fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_deref()
    }
}

// Token values are bearer credentials; Debug prints presence only.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access", &self.access.is_some())
            .field("refresh", &self.refresh.is_some())
            .finish()
    }
}

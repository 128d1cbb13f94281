//! Route gate: pure request-path classification.
//!
//! Decides, before any handler runs, whether a path is reachable without a
//! session. The gate never inspects token contents; expiry is discovered
//! reactively by the refresh coordinator on the first failing request.

use crate::config::SG_ROUTE_PREFIX;

/// Paths browsers may reach without a session.
///
/// The credential proxy endpoints themselves are covered separately through
/// `SG_ROUTE_PREFIX`; without that, the gate would deadlock new users who
/// have no way left to establish a session.
const PUBLIC_PATHS: &[&str] = &["/auth", "/auth/login", "/auth/signup", "/auth/verify"];

/// Asset prefixes served without a session.
const ASSET_PATHS: &[&str] = &["/static", "/assets", "/favicon.ico"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RequireSession,
}

/// Whether a path belongs to the credential proxy endpoints.
///
/// Those surface their own 401s untouched: the refresh coordinator must not
/// intercept them, and the gate always lets them through.
pub fn is_credential_path(path: &str) -> bool {
    path.starts_with(SG_ROUTE_PREFIX.as_str())
}

/// Classify a request path. Pure: the same path always yields the same
/// decision for a given configuration.
pub fn classify(path: &str) -> GateDecision {
    if ASSET_PATHS.iter().any(|p| path.starts_with(p)) {
        return GateDecision::Allow;
    }

    if is_credential_path(path) {
        return GateDecision::Allow;
    }

    // Landing page is an exact match; a prefix match on "/" would allow
    // everything.
    if path == "/" {
        return GateDecision::Allow;
    }

    if PUBLIC_PATHS.iter().any(|p| path.starts_with(p)) {
        return GateDecision::Allow;
    }

    GateDecision::RequireSession
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_pages_allowed() {
        assert_eq!(classify("/"), GateDecision::Allow);
        assert_eq!(classify("/auth"), GateDecision::Allow);
        assert_eq!(classify("/auth/login"), GateDecision::Allow);
        assert_eq!(classify("/auth/signup"), GateDecision::Allow);
        assert_eq!(classify("/auth/verify"), GateDecision::Allow);
    }

    #[test]
    fn test_credential_endpoints_allowed() {
        // Every endpoint needed to establish a session must be reachable
        // without one.
        assert_eq!(classify("/api/auth/login-start"), GateDecision::Allow);
        assert_eq!(classify("/api/auth/signup"), GateDecision::Allow);
        assert_eq!(classify("/api/auth/social-login"), GateDecision::Allow);
        assert_eq!(classify("/api/auth/refresh"), GateDecision::Allow);
        assert_eq!(classify("/api/auth/logout"), GateDecision::Allow);
        assert_eq!(classify("/api/auth/whoami"), GateDecision::Allow);
    }

    #[test]
    fn test_assets_allowed() {
        assert_eq!(classify("/static/app.css"), GateDecision::Allow);
        assert_eq!(classify("/assets/logo.svg"), GateDecision::Allow);
        assert_eq!(classify("/favicon.ico"), GateDecision::Allow);
    }

    #[test]
    fn test_protected_paths_require_session() {
        assert_eq!(classify("/home"), GateDecision::RequireSession);
        assert_eq!(classify("/settings/profile"), GateDecision::RequireSession);
        assert_eq!(classify("/api/orders"), GateDecision::RequireSession);
    }

    #[test]
    fn test_classification_is_idempotent() {
        for path in ["/", "/home", "/auth/login", "/api/auth/refresh"] {
            assert_eq!(classify(path), classify(path));
        }
    }

    #[test]
    fn test_is_credential_path() {
        assert!(is_credential_path("/api/auth/refresh"));
        assert!(!is_credential_path("/api/orders"));
    }
}

//! Central configuration for the session-gateway-axum crate

use std::sync::LazyLock;

/// Where the route gate sends requests that arrive without a session.
/// Default: "/auth"
pub static SG_REDIRECT_ANON: LazyLock<String> =
    LazyLock::new(|| std::env::var("SG_REDIRECT_ANON").unwrap_or_else(|_| "/auth".to_string()));

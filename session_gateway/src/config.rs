//! Central configuration for the session-gateway crate

use std::sync::LazyLock;

/// Route prefix for all credential proxy endpoints
///
/// This is the prefix under which the gateway's authentication endpoints are
/// mounted. The route gate allow-list is derived from it, so new browsers can
/// always reach the endpoints needed to establish a session.
/// Default: "/api/auth"
pub static SG_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| std::env::var("SG_ROUTE_PREFIX").unwrap_or_else(|_| "/api/auth".to_string()));

use std::env;
use std::sync::LazyLock;

/// Base URL of the backend identity service, e.g. "http://localhost:8000".
pub(super) static BACKEND_URL: LazyLock<String> =
    LazyLock::new(|| env::var("BACKEND_URL").expect("Missing BACKEND_URL!"));

/// Outbound request timeout towards the backend, in seconds.
///
/// Credential calls must stay bounded so a slow upstream surfaces as an
/// ordinary failure instead of pinning the request. Default: 8 seconds.
pub(super) static BACKEND_TIMEOUT_SECS: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SG_BACKEND_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8)
});

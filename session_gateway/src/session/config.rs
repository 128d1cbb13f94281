use std::sync::LazyLock;

pub static ACCESS_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SG_ACCESS_COOKIE_NAME")
        .ok()
        .unwrap_or("access".to_string())
});

pub static REFRESH_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SG_REFRESH_COOKIE_NAME")
        .ok()
        .unwrap_or("refresh".to_string())
});

/// Access cookie lifetime in seconds. Default: 30 minutes.
pub(super) static ACCESS_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SG_ACCESS_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1800)
});

/// Refresh cookie lifetime in seconds. Default: 24 hours.
pub(super) static REFRESH_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SG_REFRESH_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(86400)
});

/// Whether session cookies carry the Secure attribute.
/// Set SG_SECURE_COOKIES=false only for local development over plain HTTP.
pub(super) static SECURE_COOKIES: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("SG_SECURE_COOKIES")
        .map(|val| val.to_lowercase() != "false")
        .unwrap_or(true)
});

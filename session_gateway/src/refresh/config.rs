use std::env;
use std::sync::LazyLock;

/// Public base URL of the gateway itself, used for internal same-origin
/// refresh calls, e.g. "https://app.example.com".
pub(super) static ORIGIN: LazyLock<String> =
    LazyLock::new(|| env::var("ORIGIN").expect("Missing ORIGIN!"));

use thiserror::Error;

/// Outcome of an upstream refresh attempt. Clone because one settled result
/// is broadcast to every request waiting on the same flight.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    /// The backend rejected the refresh token; the session is terminal and
    /// callers must force re-authentication.
    #[error("Refresh rejected ({0})")]
    Rejected(u16),

    #[error("No refresh credential")]
    NoCredential,

    #[error("Network error: {0}")]
    Network(String),

    /// The in-flight refresh was dropped before settling.
    #[error("Refresh interrupted")]
    Interrupted,
}

/// Failure of an intercepted request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterceptError {
    /// The request itself came back 401 and was not (or could not be)
    /// recovered.
    #[error("Unauthorized")]
    Unauthorized,

    /// The shared refresh flight failed; every queued request gets this.
    #[error("Refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    #[error("Request error: {0}")]
    Request(String),
}

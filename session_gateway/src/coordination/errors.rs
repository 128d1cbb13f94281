//! Error types for the gateway coordination layer

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::backend::BackendError;
use crate::session::SessionError;

/// Errors that can occur while coordinating gateway flows
#[derive(Debug, Error)]
pub enum CoordinationError {
    /// Malformed or missing input, rejected before any backend call
    #[error("{0}")]
    Validation(String),

    /// No usable credential for the requested operation
    #[error("Unauthorized")]
    Unauthorized,

    /// Social sign-in could not produce a session; detail is logged, never
    /// surfaced to the provider-redirect flow
    #[error("Sign-in denied")]
    SigninDenied,

    /// The backend answered with a non-2xx status the gateway passes through
    #[error("Upstream error: {status}")]
    Upstream { status: StatusCode, body: Value },

    /// Error talking to the backend (network, timeout, bad body)
    #[error("Backend error: {0}")]
    Backend(BackendError),

    /// Error from session cookie operations
    #[error("Session error: {0}")]
    Session(SessionError),
}

impl CoordinationError {
    /// Log the error and return self, allowing method chaining at the point
    /// where the error is raised.
    pub fn log(self) -> Self {
        match &self {
            Self::Validation(msg) => tracing::debug!("Validation rejected: {}", msg),
            Self::Unauthorized => tracing::debug!("Unauthorized"),
            Self::SigninDenied => tracing::error!("Sign-in denied"),
            Self::Upstream { status, body } => {
                tracing::error!("Upstream error {}: {}", status, body)
            }
            Self::Backend(err) => tracing::error!("Backend error: {}", err),
            Self::Session(err) => tracing::error!("Session error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<BackendError> for CoordinationError {
    fn from(err: BackendError) -> Self {
        let error = Self::Backend(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::Session(err);
        tracing::error!("{}", error);
        error
    }
}

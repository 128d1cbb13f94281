use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout talking to backend: {0}")]
    Timeout(String),

    #[error("Invalid response body: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

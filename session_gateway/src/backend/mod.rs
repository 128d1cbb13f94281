mod client;
mod config;
mod errors;
mod types;

pub use client::BackendClient;
pub use errors::BackendError;
pub use types::{ProxyResponse, SignupPayload, SocialLoginPayload};

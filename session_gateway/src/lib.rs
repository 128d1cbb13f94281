//! session-gateway - Session gateway core for browser-facing identity flows
//!
//! This crate sits between browser clients and a backend identity service.
//! It owns the credential cookie model, the login-or-register bootstrap
//! performed at social sign-in, the core logic behind the credential proxy
//! endpoints, the single-flight refresh coordinator, and the route-gate
//! classifier.

mod backend;
mod config;
mod coordination;
mod gate;
mod refresh;
mod session;
mod utils;

pub use backend::{BackendClient, BackendError, ProxyResponse, SignupPayload, SocialLoginPayload};

pub use coordination::{
    CoordinationError, ProviderIdentity, RefreshOutcome, SignupOutcome, SignupRequest,
    WhoamiOutcome, bootstrap_social_signin, logout_headers, refresh_core, signup_core, whoami_core,
};

pub use gate::{GateDecision, classify, is_credential_path};

pub use refresh::{
    Attempt, HttpRefreshUpstream, InterceptError, RefreshCoordinator, RefreshError,
    RefreshUpstream,
};

pub use session::{
    ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME, Session, SessionError, TokenPair,
    clear_session_headers, session_credential_headers, session_rotation_headers,
};

// Re-export the route prefix
pub use config::SG_ROUTE_PREFIX;

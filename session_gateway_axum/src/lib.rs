//! Axum surface of the session gateway: the credential proxy endpoints and
//! the route-gate middleware.

mod auth;
mod config;
mod error;
mod middleware;
mod router;

pub use config::SG_REDIRECT_ANON;
pub use error::IntoResponseError;
pub use middleware::route_gate;
pub use router::{session_gateway_router, session_gateway_router_no_trace};

// Re-export the route prefix and core entry points from session_gateway
pub use session_gateway::{
    BackendClient, ProviderIdentity, SG_ROUTE_PREFIX, bootstrap_social_signin,
};

//! Combined router for the credential proxy endpoints

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use session_gateway::BackendClient;

use super::auth;

/// Create the router for the credential proxy endpoints.
///
/// Mount it under `SG_ROUTE_PREFIX` so the route gate and the refresh
/// coordinator recognize the endpoints:
///
/// ```rust,no_run
/// use axum::Router;
/// use session_gateway_axum::{BackendClient, SG_ROUTE_PREFIX, session_gateway_router};
///
/// let app: Router = Router::new().nest(
///     SG_ROUTE_PREFIX.as_str(),
///     session_gateway_router(BackendClient::new()),
/// );
/// ```
pub fn session_gateway_router(client: BackendClient) -> Router {
    session_gateway_router_no_trace(client).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`session_gateway_router`] but without HTTP tracing middleware.
/// Use this to add your own tracing layer, or none at all.
pub fn session_gateway_router_no_trace(client: BackendClient) -> Router {
    Router::new()
        .route("/login-start", post(auth::login_start))
        .route("/signup", post(auth::signup))
        .route("/social-login", post(auth::social_login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/whoami", get(auth::whoami))
        .with_state(Arc::new(client))
}

//! Minimal application wired through the session gateway: a public landing
//! page, a protected dashboard behind the route gate, the credential proxy
//! endpoints under `SG_ROUTE_PREFIX`, and a provider callback that runs the
//! sign-in bootstrap.
//!
//! Requires `BACKEND_URL` (see `.env`); listens on port 3001.

use axum::{
    Router,
    extract::{Query, State},
    middleware::from_fn,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use dotenvy::dotenv;
use serde::Deserialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_gateway_axum::{
    BackendClient, ProviderIdentity, SG_ROUTE_PREFIX, bootstrap_social_signin, route_gate,
    session_gateway_router,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = BackendClient::new();

    let app = Router::new()
        .route("/", get(index))
        .route("/auth", get(signin_page))
        .route("/auth/callback", get(provider_callback))
        .route("/dashboard", get(dashboard))
        .with_state(Arc::new(client.clone()))
        .nest(SG_ROUTE_PREFIX.as_str(), session_gateway_router(client))
        .layer(from_fn(route_gate));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(r#"<p>Session gateway demo. <a href="/dashboard">Dashboard</a> | <a href="/auth">Sign in</a></p>"#)
}

async fn signin_page() -> Html<&'static str> {
    Html(r#"<p>Sign in: <a href="/auth/callback?email=demo@example.com&name=Demo%20User&provider=demo">continue as demo user</a></p>"#)
}

async fn dashboard() -> Html<&'static str> {
    Html("<p>Protected dashboard. You have a session.</p>")
}

#[derive(Deserialize)]
struct CallbackParams {
    email: Option<String>,
    name: Option<String>,
    provider: Option<String>,
}

/// Stand-in for an identity provider redirect. A real deployment verifies
/// the provider's token before trusting the identity.
async fn provider_callback(
    State(client): State<Arc<BackendClient>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let identity = ProviderIdentity {
        email: params.email.unwrap_or_default(),
        full_name: params.name,
        provider: params.provider,
    };

    match bootstrap_social_signin(&client, &identity).await {
        Ok(headers) => (headers, Redirect::to("/dashboard")).into_response(),
        Err(err) => {
            tracing::error!("Sign-in bootstrap failed: {}", err);
            Redirect::temporary("/auth").into_response()
        }
    }
}

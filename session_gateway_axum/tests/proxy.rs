//! End-to-end tests for the credential proxy endpoints and the route gate.
//!
//! Two real servers run per test on ephemeral ports: a scripted mock
//! backend, and the gateway app under test. Requests are driven with a
//! reqwest client that never follows redirects, so redirect responses can
//! be asserted directly.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use session_gateway_axum::{
    BackendClient, SG_ROUTE_PREFIX, route_gate, session_gateway_router_no_trace,
};

#[derive(Default)]
struct Script {
    responses: Mutex<HashMap<&'static str, VecDeque<(u16, Value)>>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl Script {
    fn push(&self, operation: &'static str, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back((status, body));
    }

    fn pop(&self, operation: &'static str) -> (u16, Value) {
        *self.calls.lock().unwrap().entry(operation).or_default() += 1;
        self.responses
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(|queue| queue.pop_front())
            .unwrap_or((500, json!({"message": "unscripted call"})))
    }

    fn calls(&self, operation: &'static str) -> usize {
        self.calls.lock().unwrap().get(operation).copied().unwrap_or(0)
    }
}

fn play(script: &Script, operation: &'static str) -> Response {
    let (status, body) = script.pop(operation);
    (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn start_mock_backend(script: Arc<Script>) -> String {
    let app = Router::new()
        .route(
            "/api/mobile/login",
            post(|State(s): State<Arc<Script>>| async move { play(&s, "login") }),
        )
        .route(
            "/api/mobile/signup",
            post(|State(s): State<Arc<Script>>| async move { play(&s, "signup") }),
        )
        .route(
            "/api/mobile/social-login",
            post(|State(s): State<Arc<Script>>| async move { play(&s, "social-login") }),
        )
        .route(
            "/api/mobile/token/refresh",
            post(|State(s): State<Arc<Script>>| async move { play(&s, "refresh") }),
        )
        .route(
            "/api/mobile/me",
            get(|State(s): State<Arc<Script>>| async move { play(&s, "me") }),
        )
        .with_state(script);

    serve(app).await
}

/// Gateway app the way an application would assemble it: a protected page,
/// the proxy endpoints under the route prefix, and the gate over everything.
async fn start_gateway(script: Arc<Script>) -> String {
    let backend_url = start_mock_backend(script).await;
    let app = Router::new()
        .route("/dashboard", get(|| async { "dashboard" }))
        .nest(
            SG_ROUTE_PREFIX.as_str(),
            session_gateway_router_no_trace(BackendClient::with_base_url(&backend_url)),
        )
        .layer(from_fn(route_gate));

    serve(app).await
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(http::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn signup_without_identifier_is_rejected_locally() {
    let script = Arc::new(Script::default());
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/signup"))
        .json(&json!({"full_name": "Ada"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["message"], "Either email or phone is required.");
    assert_eq!(script.calls("signup"), 0);
}

#[tokio::test]
async fn signup_conflict_maps_to_canonical_409() {
    let script = Arc::new(Script::default());
    script.push("signup", 409, json!({"message": "duplicate key"}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/signup"))
        .json(&json!({"email": "a@b.com", "full_name": "Ada"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ALREADY_EXISTS");
    assert_eq!(
        body["message"],
        "An account with this identifier already exists. Please login."
    );
}

#[tokio::test]
async fn signup_body_marker_conflict_maps_to_409() {
    let script = Arc::new(Script::default());
    script.push("signup", 400, json!({"message": "User already exists"}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/signup"))
        .json(&json!({"phone": "+1 555 123", "full_name": "Ada"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn signup_success_returns_201_envelope() {
    let script = Arc::new(Script::default());
    script.push("signup", 201, json!({"user": {"id": "u1"}}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/signup"))
        .json(&json!({"email": "a@b.com", "name": "Ada"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["message"], "Account created successfully");
    assert_eq!(body["user"], json!({"id": "u1"}));
}

#[tokio::test]
async fn login_start_without_identifier_is_rejected_locally() {
    let script = Arc::new(Script::default());
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/login-start"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(script.calls("login"), 0);
}

#[tokio::test]
async fn login_start_passes_backend_response_through() {
    let script = Arc::new(Script::default());
    script.push("login", 200, json!({"status": "OTP_SENT"}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/login-start"))
        .json(&json!({"email": "a@b.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OTP_SENT");
    assert_eq!(script.calls("login"), 1);
}

#[tokio::test]
async fn social_login_moves_tokens_into_cookies() {
    let script = Arc::new(Script::default());
    script.push(
        "social-login",
        200,
        json!({"access": "A1", "refresh": "R1", "user": {"id": "u1"}}),
    );
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/social-login"))
        .json(&json!({"email": "a@b.com", "full_name": "Ada", "provider": "google"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("access=A1;") && c.contains("Max-Age=1800")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh=R1;") && c.contains("Max-Age=86400")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
}

#[tokio::test]
async fn social_login_with_refresh_only_response_sets_the_refresh_cookie() {
    let script = Arc::new(Script::default());
    script.push("social-login", 200, json!({"refresh": "R9"}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/social-login"))
        .json(&json!({"email": "a@b.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("refresh=R9;"));
}

#[tokio::test]
async fn refresh_without_cookie_is_401_without_backend_call() {
    let script = Arc::new(Script::default());
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/refresh"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "No refresh token");
    assert_eq!(script.calls("refresh"), 0);
}

#[tokio::test]
async fn refresh_success_rotates_both_cookies() {
    let script = Arc::new(Script::default());
    script.push("refresh", 200, json!({"access": "A2", "refresh": "R2"}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/refresh"))
        .header(http::header::COOKIE, "refresh=R1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let cookies = set_cookies(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OK");

    assert!(cookies.iter().any(|c| c.starts_with("access=A2;") && c.contains("Max-Age=1800")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh=R2;") && c.contains("Max-Age=86400")));
}

#[tokio::test]
async fn refresh_rejection_clears_both_cookies() {
    let script = Arc::new(Script::default());
    script.push("refresh", 401, json!({"message": "expired"}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/refresh"))
        .header(http::header::COOKIE, "refresh=stale")
        .send()
        .await
        .unwrap();

    // Status and body pass through; cookies are expired so the browser
    // re-authenticates instead of retry-looping.
    assert_eq!(response.status(), 401);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=-86400")));
    assert!(cookies.iter().any(|c| c.starts_with("access=;")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh=;")));
}

#[tokio::test]
async fn logout_clears_both_cookies() {
    let script = Arc::new(Script::default());
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .post(format!("{origin}/api/auth/logout"))
        .header(http::header::COOKIE, "access=A1; refresh=R1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let cookies = set_cookies(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logged out");

    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=-86400")));
}

#[tokio::test]
async fn whoami_reports_identity_with_valid_access() {
    let script = Arc::new(Script::default());
    script.push("me", 200, json!({"user": {"id": "u1", "email": "a@b.com"}}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .get(format!("{origin}/api/auth/whoami"))
        .header(http::header::COOKIE, "access=A1; refresh=R1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["id"], "u1");
    assert_eq!(script.calls("refresh"), 0);
}

#[tokio::test]
async fn whoami_refreshes_once_and_retries() {
    let script = Arc::new(Script::default());
    script.push("me", 401, json!({}));
    script.push("refresh", 200, json!({"access": "A2", "refresh": "R2"}));
    script.push("me", 200, json!({"user": {"id": "u1"}}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .get(format!("{origin}/api/auth/whoami"))
        .header(http::header::COOKIE, "access=stale; refresh=R1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let cookies = set_cookies(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["id"], "u1");

    // Exactly one refresh, exactly one retry; rotated cookies ride along.
    assert_eq!(script.calls("me"), 2);
    assert_eq!(script.calls("refresh"), 1);
    assert!(cookies.iter().any(|c| c.starts_with("access=A2;")));
}

#[tokio::test]
async fn whoami_stays_anonymous_after_failed_refresh() {
    let script = Arc::new(Script::default());
    script.push("me", 401, json!({}));
    script.push("refresh", 401, json!({"message": "expired"}));
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .get(format!("{origin}/api/auth/whoami"))
        .header(http::header::COOKIE, "access=stale; refresh=stale")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let cookies = set_cookies(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"], json!(null));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=-86400")));
}

#[tokio::test]
async fn whoami_without_any_cookie_is_anonymous_without_backend_call() {
    let script = Arc::new(Script::default());
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .get(format!("{origin}/api/auth/whoami"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(script.calls("me"), 0);
    assert_eq!(script.calls("refresh"), 0);
}

#[tokio::test]
async fn route_gate_redirects_anonymous_requests() {
    let script = Arc::new(Script::default());
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .get(format!("{origin}/dashboard"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 307);
    assert_eq!(
        response.headers().get(http::header::LOCATION).unwrap(),
        "/auth"
    );
}

#[tokio::test]
async fn route_gate_passes_requests_with_an_access_cookie() {
    let script = Arc::new(Script::default());
    let origin = start_gateway(script.clone()).await;

    let response = client()
        .get(format!("{origin}/dashboard"))
        .header(http::header::COOKIE, "access=A1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "dashboard");
}

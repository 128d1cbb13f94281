//! Credential proxy handlers: thin translations between HTTP and the core
//! coordination functions.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use axum_extra::{TypedHeader, headers};
use serde_json::{Value, json};

use session_gateway::{
    BackendClient, CoordinationError, RefreshOutcome, Session, SignupOutcome, SignupRequest,
    SocialLoginPayload, WhoamiOutcome, logout_headers, refresh_core, session_credential_headers,
    signup_core, whoami_core,
};

use super::error::IntoResponseError;

type JsonError = (StatusCode, Json<Value>);

/// Forward an OTP-issuance login request to the backend.
///
/// Presence of an identifier is checked here; everything else, including
/// which identifier the backend accepts, is the backend's business. Status
/// and body pass through verbatim.
pub(super) async fn login_start(
    State(client): State<Arc<BackendClient>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), JsonError> {
    let has_identifier = ["email", "phone"].iter().any(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    });
    if !has_identifier {
        return Err::<_, CoordinationError>(
            CoordinationError::Validation("Either email or phone is required.".to_string()).log(),
        )
        .into_response_error();
    }

    let response = client
        .login_start(&body)
        .await
        .map_err(CoordinationError::from)
        .into_response_error()?;

    Ok((response.status, Json(response.body)))
}

/// Register a new account through the backend.
///
/// A backend conflict is translated into the canonical 409 envelope so the
/// client can offer "please log in" instead of surfacing a raw backend
/// error.
pub(super) async fn signup(
    State(client): State<Arc<BackendClient>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), JsonError> {
    match signup_core(&client, &request).await.into_response_error()? {
        SignupOutcome::Created { user } => Ok((
            StatusCode::CREATED,
            Json(json!({
                "status": "SUCCESS",
                "message": "Account created successfully",
                "user": user,
            })),
        )),
        SignupOutcome::AlreadyExists => Ok((
            StatusCode::CONFLICT,
            Json(json!({
                "status": "ALREADY_EXISTS",
                "message": "An account with this identifier already exists. Please login.",
            })),
        )),
    }
}

/// Exchange a provider identity for a session.
///
/// The backend response passes through; when it carries credentials, they
/// move into HTTP-only cookies and never reach the response body consumer
/// as anything the page scripts must store.
pub(super) async fn social_login(
    State(client): State<Arc<BackendClient>>,
    Json(payload): Json<SocialLoginPayload>,
) -> Result<(StatusCode, HeaderMap, Json<Value>), JsonError> {
    let response = client
        .social_login(&payload)
        .await
        .map_err(CoordinationError::from)
        .into_response_error()?;

    // Each cookie is set independently: the backend may rotate only one
    // half of the pair.
    let headers = session_credential_headers(
        response.token_field("access"),
        response.token_field("refresh"),
    )
    .map_err(CoordinationError::from)
    .into_response_error()?;

    Ok((response.status, headers, Json(response.body)))
}

/// Rotate the session cookies using the refresh cookie.
pub(super) async fn refresh(
    State(client): State<Arc<BackendClient>>,
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> Result<(StatusCode, HeaderMap, Json<Value>), JsonError> {
    let session = match &cookies {
        Some(TypedHeader(cookies)) => Session::from_cookie(cookies),
        None => Session::from_cookie_header(None),
    };

    match refresh_core(&client, &session).await {
        Ok(RefreshOutcome::Rotated { headers, .. }) => {
            Ok((StatusCode::OK, headers, Json(json!({"status": "OK"}))))
        }
        Ok(RefreshOutcome::Failed {
            headers,
            status,
            body,
        }) => Ok((status, headers, Json(body))),
        Err(CoordinationError::Unauthorized) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": "ERROR", "message": "No refresh token"})),
        )),
        Err(err) => Err(err).into_response_error(),
    }
}

/// End the session. Always succeeds; the backend is never consulted.
pub(super) async fn logout() -> Result<(HeaderMap, Json<Value>), JsonError> {
    let headers = logout_headers().into_response_error()?;
    Ok((
        headers,
        Json(json!({"status": "OK", "message": "Logged out"})),
    ))
}

/// Report the current identity, refreshing the session once if needed.
pub(super) async fn whoami(
    State(client): State<Arc<BackendClient>>,
    headers: HeaderMap,
) -> Result<(StatusCode, HeaderMap, Json<Value>), JsonError> {
    let session = Session::from_headers(&headers);
    let cookie_header = headers
        .get(http::header::COOKIE)
        .and_then(|v| v.to_str().ok());

    match whoami_core(&client, &session, cookie_header)
        .await
        .into_response_error()?
    {
        WhoamiOutcome::Authenticated { headers, user } => {
            Ok((StatusCode::OK, headers, Json(json!({"user": user}))))
        }
        WhoamiOutcome::Anonymous { headers } => Ok((
            StatusCode::UNAUTHORIZED,
            headers,
            Json(json!({"user": null})),
        )),
    }
}

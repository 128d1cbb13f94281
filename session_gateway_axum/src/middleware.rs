use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use session_gateway::{GateDecision, Session, classify};

use super::config::SG_REDIRECT_ANON;

/// Route gate middleware: requests to protected paths must carry an access
/// cookie, everything else passes through.
///
/// Presence-only. The cookie value is never inspected here; an expired token
/// sails through and is dealt with reactively by the refresh machinery on
/// the first 401.
pub async fn route_gate(req: Request, next: Next) -> Response {
    match classify(req.uri().path()) {
        GateDecision::Allow => next.run(req).await,
        GateDecision::RequireSession => {
            let session = Session::from_headers(req.headers());
            if session.has_access() {
                next.run(req).await
            } else {
                tracing::debug!("No access cookie for {}; redirecting", req.uri().path());
                Redirect::temporary(SG_REDIRECT_ANON.as_str()).into_response()
            }
        }
    }
}

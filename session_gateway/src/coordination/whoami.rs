use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::backend::{BackendClient, ProxyResponse};
use crate::session::Session;

use super::errors::CoordinationError;
use super::token::{RefreshOutcome, refresh_core};

/// Outcome of an identity lookup. Headers carry any cookie rotation (or
/// clearing) performed by the internal refresh attempt.
#[derive(Debug)]
pub enum WhoamiOutcome {
    Authenticated { headers: HeaderMap, user: Value },
    Anonymous { headers: HeaderMap },
}

/// Look up the current identity for a browser session.
///
/// Tries the access token first; on 401 performs exactly one in-process
/// refresh with the session's refresh token and retries the lookup once. A
/// second 401 reports anonymous instead of recursing. Backend failures
/// other than 401 pass through.
pub async fn whoami_core(
    client: &BackendClient,
    session: &Session,
    cookie_header: Option<&str>,
) -> Result<WhoamiOutcome, CoordinationError> {
    if let Some(access) = session.access_token() {
        let response = client.whoami(Some(access), cookie_header).await?;
        if response.is_success() {
            return Ok(WhoamiOutcome::Authenticated {
                headers: HeaderMap::new(),
                user: extract_user(response),
            });
        }
        if response.status != StatusCode::UNAUTHORIZED {
            return Err(CoordinationError::Upstream {
                status: response.status,
                body: response.body,
            }
            .log());
        }
        tracing::debug!("Access token rejected; attempting one refresh");
    }

    match refresh_core(client, session).await {
        Ok(RefreshOutcome::Rotated { headers, pair }) => {
            let access = pair.as_ref().map(|p| p.access.as_str());
            let response = client.whoami(access, cookie_header).await?;
            if response.is_success() {
                Ok(WhoamiOutcome::Authenticated {
                    headers,
                    user: extract_user(response),
                })
            } else {
                // Single attempt: a 401 on the retried lookup stays anonymous.
                tracing::debug!("Lookup still unauthorized after refresh");
                Ok(WhoamiOutcome::Anonymous { headers })
            }
        }
        Ok(RefreshOutcome::Failed { headers, .. }) => Ok(WhoamiOutcome::Anonymous { headers }),
        Err(CoordinationError::Unauthorized) => Ok(WhoamiOutcome::Anonymous {
            headers: HeaderMap::new(),
        }),
        Err(err) => Err(err),
    }
}

/// The backend wraps the identity inconsistently across deployments.
fn extract_user(response: ProxyResponse) -> Value {
    let body = response.body;
    if let Some(user) = body.get("user") {
        if !user.is_null() {
            return user.clone();
        }
    }
    if let Some(data) = body.get("data") {
        if !data.is_null() {
            return data.clone();
        }
    }
    body
}

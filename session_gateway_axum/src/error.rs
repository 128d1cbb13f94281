use axum::Json;
use http::StatusCode;
use serde_json::{Value, json};
use session_gateway::CoordinationError;

/// Helper trait for converting coordination errors to the gateway's JSON
/// error envelope
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, Json<Value>)>;
}

/// Implementation for CoordinationError mapping variants to status codes and
/// an `{"status": "ERROR", "message": ...}` body
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, Json<Value>)> {
        self.map_err(|e| match e {
            CoordinationError::Validation(msg) => (StatusCode::BAD_REQUEST, error_body(&msg)),
            CoordinationError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, error_body("Unauthorized"))
            }
            CoordinationError::SigninDenied => {
                (StatusCode::UNAUTHORIZED, error_body("Sign-in denied"))
            }
            CoordinationError::Upstream { status, body } => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
                (status, error_body(&message))
            }
            CoordinationError::Backend(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err.to_string()))
            }
            CoordinationError::Session(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err.to_string()))
            }
        })
    }
}

fn error_body(message: &str) -> Json<Value> {
    Json(json!({"status": "ERROR", "message": message}))
}

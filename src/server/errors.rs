use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::dispatch::DispatchError;

/// Map a dispatch failure to the client-facing error shape.
///
/// Client errors carry `{"error": ...}`; server errors add the upstream or
/// encoder diagnostic under `details`.
pub fn dispatch_error_to_response(err: DispatchError) -> Response {
    match err {
        DispatchError::Validation(_) => json_error(StatusCode::BAD_REQUEST, err.to_string()),
        DispatchError::Transport { authority, source } => json_error_with_details(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to send request to {authority}"),
            source.to_string(),
        ),
        DispatchError::Serialization(e) => json_error_with_details(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to encode JSON",
            e.to_string(),
        ),
        other => json_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// Body that failed to bind to a submission: malformed JSON, a missing
/// mandatory field or an unsupported country.
pub fn rejection_to_response(rejection: JsonRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub fn json_error_with_details(
    status: StatusCode,
    message: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({
            "error": message.into(),
            "details": details.into(),
        })),
    )
        .into_response()
}

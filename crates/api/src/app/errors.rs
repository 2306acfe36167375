use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopbook_infra::{ServiceError, StoreError};
use shopbook_records::RecordKind;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(e) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
        ServiceError::Store(e @ StoreError::NotFound { .. }) => {
            json_error(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        ServiceError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

/// Malformed or non-object request bodies.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_collection(s: &str) -> Result<RecordKind, axum::response::Response> {
    s.parse::<RecordKind>()
        .map_err(|e| json_error(StatusCode::NOT_FOUND, "unknown_collection", e.to_string()))
}

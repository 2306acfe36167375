use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

use shopbook_core::RecordId;
use shopbook_records::Fields;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/:collection", get(list_records).post(create_record))
        .route("/:collection/:id", delete(delete_record))
}

pub async fn create_record(
    Extension(services): Extension<Arc<AppServices>>,
    Path(collection): Path<String>,
    body: Result<Json<Fields>, JsonRejection>,
) -> axum::response::Response {
    let kind = match errors::parse_collection(&collection) {
        Ok(k) => k,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.records.create(kind, &body).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": id.to_string() })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_records(
    Extension(services): Extension<Arc<AppServices>>,
    Path(collection): Path<String>,
) -> axum::response::Response {
    let kind = match errors::parse_collection(&collection) {
        Ok(k) => k,
        Err(res) => return res,
    };

    match services.records.list(kind).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_record(
    Extension(services): Extension<Arc<AppServices>>,
    Path((collection, id)): Path<(String, String)>,
) -> axum::response::Response {
    let kind = match errors::parse_collection(&collection) {
        Ok(k) => k,
        Err(res) => return res,
    };
    let id: RecordId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid record id"),
    };

    match services.records.delete(kind, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

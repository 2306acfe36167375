use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::app::dto::{self, DailySalesResponse, SummaryResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_summary))
        .route("/daily-sales", get(get_daily_sales))
}

pub async fn get_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::WindowQuery>,
) -> axum::response::Response {
    let window = match query.resolve(Utc::now().date_naive()) {
        Ok(w) => w,
        Err(res) => return res,
    };

    match services.records.summarize(window).await {
        Ok(summary) => Json(SummaryResponse::new(window, summary)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_daily_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::WindowQuery>,
) -> axum::response::Response {
    let window = match query.resolve(Utc::now().date_naive()) {
        Ok(w) => w,
        Err(res) => return res,
    };

    match services.records.daily_sales(window).await {
        Ok(days) => Json(DailySalesResponse { window, days }).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

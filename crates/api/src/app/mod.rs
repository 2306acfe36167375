//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the shared record service
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: query parameters and response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use shopbook_infra::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Fails if the configured store cannot be reached.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(&config.store).await?);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services))))
}

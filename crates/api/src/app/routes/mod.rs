use axum::Router;

pub mod records;
pub mod summary;
pub mod system;

/// Router for every endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .nest("/records", records::router())
        .nest("/summary", summary::router())
}

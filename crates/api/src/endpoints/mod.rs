//! API endpoints.

mod auth;

use axum::{Router, routing::get};

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
}

async fn health() -> &'static str {
    "OK"
}

//! HTTP API layer for campus-rs.
//!
//! This crate provides the JSON API:
//!
//! - **Endpoints**: login, signup, logout and token refresh under `/auth`
//! - **Extractors**: the authenticated account
//! - **Middleware**: bearer token authentication, request tracing, CORS
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;

pub use endpoints::router;
pub use middleware::AppState;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the complete application: routes, auth middleware, tracing and CORS.
pub fn app(state: AppState) -> Router {
    router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use campus_common::AppError;
use campus_db::entities::account;

/// Authenticated account extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub account::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by auth middleware
        parts
            .extensions
            .get::<account::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

//! Authentication endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::{AuthResponse, LoginInput, SignupInput};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{extractors::AuthUser, middleware::AppState};

/// Body carrying a refresh token.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Plain message response.
#[derive(Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}

/// Refreshed access token.
#[derive(Serialize)]
pub struct AccessResponse {
    pub access: String,
}

/// Log in with a username and password.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.auth_service.login(req).await?;
    Ok(Json(response))
}

/// Create an account.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupInput>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = state.auth_service.signup(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Revoke a refresh token. Requires a bearer access token.
async fn logout(
    AuthUser(account): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> AppResult<Json<DetailResponse>> {
    debug!(user_id = account.id, "Logout requested");
    state.auth_service.logout(req.refresh).await?;

    Ok(Json(DetailResponse {
        detail: "Logged out",
    }))
}

/// Exchange a refresh token for a new access token.
async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> AppResult<Json<AccessResponse>> {
    let token = req
        .refresh
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Validation("refresh token is required".to_string()))?;

    let access = state.auth_service.refresh(&token).await?;
    Ok(Json(AccessResponse { access }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login/", post(login))
        .route("/auth/signup/", post(signup))
        .route("/auth/logout/", post(logout))
        .route("/auth/token/refresh/", post(refresh))
}

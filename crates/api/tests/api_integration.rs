//! API integration tests.
//!
//! These tests drive the full router (auth middleware included) over a
//! mock database.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use campus_api::{AppState, app};
use campus_common::config::AuthConfig;
use campus_core::{TokenPair, TokenService};
use campus_db::entities::{account, blacklisted_token, outstanding_token, page, user_profile};
use campus_db::repositories::TokenRepository;
use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test auth configuration.
fn create_test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret-0123456789abcdef".to_string(),
        access_token_lifetime_secs: 300,
        refresh_token_lifetime_secs: 86_400,
    }
}

/// Create the test router over a prepared mock database.
fn create_test_router(db: DatabaseConnection) -> Router {
    app(AppState::new(Arc::new(db), &create_test_auth_config()))
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

/// Token service signing with the same secret as the router under test.
fn token_service(db: DatabaseConnection) -> TokenService {
    TokenService::new(
        TokenRepository::new(Arc::new(db)),
        &create_test_auth_config(),
    )
}

/// Issue a real access/refresh pair for `user_id`.
async fn issue_pair(user_id: i64) -> TokenPair {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_outstanding(1, "issued")]])
        .into_connection();
    token_service(db).issue_pair(user_id).await.unwrap()
}

fn create_test_account(id: i64, username: &str, password: &str) -> account::Model {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string();

    account::Model {
        id,
        username: username.to_string(),
        password: hash,
        email: format!("{username}@example.edu"),
        first_name: String::new(),
        last_name: String::new(),
        is_active: true,
        is_staff: false,
        is_superuser: false,
        last_login: None,
        date_joined: Utc::now().into(),
    }
}

fn create_test_profile(user_id: i64) -> user_profile::Model {
    user_profile::Model {
        id: 1,
        user_id,
        full_name: String::new(),
        profile_image: None,
        banner_image: None,
        bio: None,
        status: user_profile::ProfileStatus::Online,
        created_at: Utc::now().into(),
    }
}

fn create_test_outstanding(id: i64, jti: &str) -> outstanding_token::Model {
    outstanding_token::Model {
        id,
        jti: jti.to_string(),
        user_id: Some(1),
        token: "header.payload.signature".to_string(),
        created_at: Utc::now().into(),
        expires_at: (Utc::now() + Duration::days(1)).into(),
    }
}

fn create_test_blacklist_entry(token_id: i64) -> blacklisted_token::Model {
    blacklisted_token::Model {
        id: 1,
        token_id,
        blacklisted_at: Utc::now().into(),
    }
}

fn post_json(uri: &str, body: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_router(empty_db())
        .oneshot(
            Request::builder()
                .uri("/health")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_success_returns_tokens() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_account(1, "alice", "correct horse")]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([[create_test_outstanding(1, "login")]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/login/",
            r#"{"username":"alice","password":"correct horse"}"#,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["access"].as_str().is_some());
    assert!(body["refresh"].as_str().is_some());
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.edu");
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_account(1, "alice", "correct horse")]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/login/",
            r#"{"username":"alice","password":"battery staple"}"#,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Invalid credentials");
    assert!(body.get("access").is_none());
}

#[tokio::test]
async fn test_login_unknown_user_returns_401() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<account::Model>::new()])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/login/",
            r#"{"username":"nobody","password":"x"}"#,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["detail"], "Invalid credentials");
}

#[tokio::test]
async fn test_signup_returns_201_with_tokens() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<account::Model>::new()])
        .append_query_results([[create_test_account(7, "bob", "pw")]])
        .append_query_results([[create_test_profile(7)]])
        .append_query_results([[create_test_outstanding(1, "signup")]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/signup/",
            r#"{"username":"bob","password":"pw","email":"bob@example.edu"}"#,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], 7);
    assert_eq!(body["user"]["username"], "bob");
    assert!(body["access"].as_str().is_some());
    assert!(body["refresh"].as_str().is_some());
}

#[tokio::test]
async fn test_signup_missing_password_returns_400() {
    let response = create_test_router(empty_db())
        .oneshot(post_json("/auth/signup/", r#"{"username":"bob"}"#, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "username and password are required"
    );
}

#[tokio::test]
async fn test_signup_duplicate_username_returns_400() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_account(1, "bob", "pw")]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/signup/",
            r#"{"username":"bob","password":"pw"}"#,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "username already exists");
}

#[tokio::test]
async fn test_logout_without_bearer_returns_401() {
    let pair = issue_pair(1).await;

    let response = create_test_router(empty_db())
        .oneshot(post_json(
            "/auth/logout/",
            &format!(r#"{{"refresh":"{}"}}"#, pair.refresh),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(response).await["detail"].as_str().is_some());
}

#[tokio::test]
async fn test_logout_without_refresh_returns_400() {
    let pair = issue_pair(1).await;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_account(1, "alice", "pw")]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json("/auth/logout/", "{}", Some(&pair.access)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "refresh token is required"
    );
}

#[tokio::test]
async fn test_logout_blacklists_refresh_token() {
    let pair = issue_pair(1).await;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // bearer resolution
        .append_query_results([[create_test_account(1, "alice", "pw")]])
        // blacklist check
        .append_query_results([[create_test_outstanding(1, "issued")]])
        .append_query_results([Vec::<blacklisted_token::Model>::new()])
        // blacklist write
        .append_query_results([[create_test_outstanding(1, "issued")]])
        .append_query_results([Vec::<blacklisted_token::Model>::new()])
        .append_query_results([[create_test_blacklist_entry(1)]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/logout/",
            &format!(r#"{{"refresh":"{}"}}"#, pair.refresh),
            Some(&pair.access),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "Logged out");
}

#[tokio::test]
async fn test_logout_twice_returns_400() {
    let pair = issue_pair(1).await;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_account(1, "alice", "pw")]])
        .append_query_results([[create_test_outstanding(1, "issued")]])
        .append_query_results([[create_test_blacklist_entry(1)]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/logout/",
            &format!(r#"{{"refresh":"{}"}}"#, pair.refresh),
            Some(&pair.access),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "Invalid refresh token");
}

#[tokio::test]
async fn test_logout_with_access_token_as_refresh_returns_400() {
    let pair = issue_pair(1).await;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_account(1, "alice", "pw")]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/logout/",
            &format!(r#"{{"refresh":"{}"}}"#, pair.access),
            Some(&pair.access),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "Invalid refresh token");
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let pair = issue_pair(1).await;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_outstanding(1, "issued")]])
        .append_query_results([Vec::<blacklisted_token::Model>::new()])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/token/refresh/",
            &format!(r#"{{"refresh":"{}"}}"#, pair.refresh),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let access = body_json(response).await["access"]
        .as_str()
        .unwrap()
        .to_string();

    let claims = token_service(empty_db())
        .decode(&access, campus_core::TokenType::Access)
        .unwrap();
    assert_eq!(claims.user_id, 1);
}

#[tokio::test]
async fn test_refresh_with_blacklisted_token_returns_401() {
    let pair = issue_pair(1).await;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_outstanding(1, "issued")]])
        .append_query_results([[create_test_blacklist_entry(1)]])
        .into_connection();

    let response = create_test_router(db)
        .oneshot(post_json(
            "/auth/token/refresh/",
            &format!(r#"{{"refresh":"{}"}}"#, pair.refresh),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "TOKEN_NOT_VALID");
}

#[tokio::test]
async fn test_signup_login_then_logout_with_issued_tokens() {
    let account = create_test_account(7, "bob", "pw");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // signup
        .append_query_results([Vec::<account::Model>::new()])
        .append_query_results([[account.clone()]])
        .append_query_results([[create_test_profile(7)]])
        .append_query_results([[create_test_outstanding(1, "signup")]])
        // login
        .append_query_results([[account.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([[create_test_outstanding(2, "login")]])
        // logout: bearer resolution, blacklist check, blacklist write
        .append_query_results([[account.clone()]])
        .append_query_results([[create_test_outstanding(2, "login")]])
        .append_query_results([Vec::<blacklisted_token::Model>::new()])
        .append_query_results([[create_test_outstanding(2, "login")]])
        .append_query_results([Vec::<blacklisted_token::Model>::new()])
        .append_query_results([[create_test_blacklist_entry(2)]])
        // refresh with the revoked token
        .append_query_results([[create_test_outstanding(2, "login")]])
        .append_query_results([[create_test_blacklist_entry(2)]])
        .into_connection();
    let router = create_test_router(db);

    let response = router
        .clone()
        .oneshot(post_json(
            "/auth/signup/",
            r#"{"username":"bob","password":"pw"}"#,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(post_json(
            "/auth/login/",
            r#"{"username":"bob","password":"pw"}"#,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], 7);
    let access = body["access"].as_str().unwrap().to_string();
    let refresh = body["refresh"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(post_json(
            "/auth/logout/",
            &format!(r#"{{"refresh":"{refresh}"}}"#),
            Some(&access),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "Logged out");

    let response = router
        .oneshot(post_json(
            "/auth/token/refresh/",
            &format!(r#"{{"refresh":"{refresh}"}}"#),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_app_state_domain_services_share_the_pool() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[page::Model {
            page_id: 3,
            page_name: "Faculty of Engineering".to_string(),
            page_type: "department".to_string(),
            description: None,
            verified: true,
            created_at: Utc::now().into(),
        }]])
        .into_connection();
    let state = AppState::new(Arc::new(db), &create_test_auth_config());

    let page = state.page_service.get(3).await.unwrap();
    assert_eq!(page.page_name, "Faculty of Engineering");
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let response = create_test_router(empty_db())
        .oneshot(
            Request::builder()
                .uri("/nonexistent/endpoint")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

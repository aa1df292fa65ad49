//! API middleware.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use campus_common::config::AuthConfig;
use campus_core::{
    AuthService, EventService, MessagingService, ModerationService, NotificationService,
    PageService, PostService, ProfileService, SocialService, TokenService,
};
use campus_db::repositories::{
    AccountRepository, CommentRepository, CommunityRepository, EventRepository,
    FollowPageRepository, FriendshipRepository, MessagingRepository, NotificationRepository,
    PageRepository, PostRepository, ProfileRepository, ReportRepository, TokenRepository,
};
use sea_orm::DatabaseConnection;
use tracing::debug;

/// Application state.
///
/// The HTTP routes only read `auth_service`. The domain services are wired
/// here for embedding callers and for routers merged onto [`crate::router`],
/// which then share one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub page_service: PageService,
    pub social_service: SocialService,
    pub post_service: PostService,
    pub messaging_service: MessagingService,
    pub event_service: EventService,
    pub notification_service: NotificationService,
    pub moderation_service: ModerationService,
}

impl AppState {
    /// Wire every repository and service onto one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, auth: &AuthConfig) -> Self {
        let account_repo = AccountRepository::new(Arc::clone(&db));
        let page_repo = PageRepository::new(Arc::clone(&db));
        let community_repo = CommunityRepository::new(Arc::clone(&db));

        let token_service = TokenService::new(TokenRepository::new(Arc::clone(&db)), auth);

        Self {
            auth_service: AuthService::new(account_repo.clone(), token_service),
            profile_service: ProfileService::new(
                ProfileRepository::new(Arc::clone(&db)),
                account_repo.clone(),
                page_repo.clone(),
            ),
            page_service: PageService::new(page_repo.clone()),
            social_service: SocialService::new(
                FriendshipRepository::new(Arc::clone(&db)),
                community_repo.clone(),
                FollowPageRepository::new(Arc::clone(&db)),
                account_repo.clone(),
                page_repo.clone(),
            ),
            post_service: PostService::new(
                PostRepository::new(Arc::clone(&db)),
                CommentRepository::new(Arc::clone(&db)),
                community_repo,
                account_repo.clone(),
                page_repo.clone(),
            ),
            messaging_service: MessagingService::new(
                MessagingRepository::new(Arc::clone(&db)),
                account_repo.clone(),
                page_repo.clone(),
            ),
            event_service: EventService::new(
                EventRepository::new(Arc::clone(&db)),
                account_repo.clone(),
                page_repo.clone(),
            ),
            notification_service: NotificationService::new(
                NotificationRepository::new(Arc::clone(&db)),
                account_repo.clone(),
            ),
            moderation_service: ModerationService::new(
                ReportRepository::new(db),
                account_repo,
                page_repo,
            ),
        }
    }
}

/// Authentication middleware.
///
/// Resolves a `Bearer` access token to its account and stores it in the
/// request extensions. Requests without a usable token pass through
/// unauthenticated; handlers that need an account reject them.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);

    if let Some(token) = token {
        match state.auth_service.authenticate_access_token(&token).await {
            Ok(account) => {
                req.extensions_mut().insert(account);
            }
            Err(e) => debug!(error = %e, "Ignoring unusable bearer token"),
        }
    }

    next.run(req).await
}

//! Notification service.

use campus_common::{AppError, AppResult};
use campus_db::entities::notification;
use campus_db::repositories::{AccountRepository, NotificationRepository};
use chrono::Utc;
use sea_orm::Set;

pub use campus_db::entities::notification::NotificationType;

/// Largest page of notifications returned at once.
const MAX_LIMIT: u64 = 100;

/// Notification service.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    account_repo: AccountRepository,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(
        notification_repo: NotificationRepository,
        account_repo: AccountRepository,
    ) -> Self {
        Self {
            notification_repo,
            account_repo,
        }
    }

    /// Notify an account.
    pub async fn notify(
        &self,
        user_id: i64,
        notification_type: NotificationType,
        content: String,
    ) -> AppResult<notification::Model> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "Notification content must not be empty".to_string(),
            ));
        }
        self.account_repo.get_by_id(user_id).await?;

        let model = notification::ActiveModel {
            user_id: Set(user_id),
            notification_type: Set(notification_type),
            content: Set(content),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.notification_repo.create(model).await
    }

    /// Mark one of the caller's notifications as read.
    pub async fn mark_read(
        &self,
        notification_id: i64,
        user_id: i64,
    ) -> AppResult<notification::Model> {
        self.notification_repo
            .mark_read(notification_id, user_id)
            .await
    }

    /// Unread notifications, newest first.
    pub async fn list_unread(
        &self,
        user_id: i64,
        limit: u64,
    ) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_unread(user_id, limit.clamp(1, MAX_LIMIT))
            .await
    }
}

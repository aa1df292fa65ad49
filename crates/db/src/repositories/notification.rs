//! Notification repository.

use std::sync::Arc;

use crate::entities::{Notification, notification};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Notification repository for database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepository {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new notification.
    pub async fn create(&self, model: notification::ActiveModel) -> AppResult<notification::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Unread notifications of an account, newest first.
    pub async fn find_unread(
        &self,
        user_id: i64,
        limit: u64,
    ) -> AppResult<Vec<notification::Model>> {
        Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::NotificationId)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Mark a notification of `user_id` as read.
    pub async fn mark_read(&self, id: i64, user_id: i64) -> AppResult<notification::Model> {
        let existing = Notification::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| AppError::NotFound(format!("Notification {id}")))?;

        if existing.is_read {
            return Ok(existing);
        }

        let mut active = existing.into_active_model();
        active.is_read = Set(true);
        active.update(self.db.as_ref()).await.map_err(map_db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_notification(id: i64, user_id: i64, is_read: bool) -> notification::Model {
        notification::Model {
            notification_id: id,
            user_id,
            notification_type: notification::NotificationType::Events,
            content: "Career fair starts in one hour".to_string(),
            is_read,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_unread() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    create_test_notification(2, 1, false),
                    create_test_notification(1, 1, false),
                ]])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let unread = repo.find_unread(1, 20).await.unwrap();

        assert_eq!(unread.len(), 2);
        assert!(unread.iter().all(|n| !n.is_read));
    }

    #[tokio::test]
    async fn test_mark_read() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_notification(1, 1, false)]])
                .append_query_results([[create_test_notification(1, 1, true)]])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let notification = repo.mark_read(1, 1).await.unwrap();

        assert!(notification.is_read);
    }

    #[tokio::test]
    async fn test_mark_read_other_users_notification() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notification::Model>::new()])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let result = repo.mark_read(1, 99).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

//! Page follow repository.

use std::sync::Arc;

use crate::entities::{FollowPage, follow_page};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

/// Page follow repository for database operations.
#[derive(Clone)]
pub struct FollowPageRepository {
    db: Arc<DatabaseConnection>,
}

impl FollowPageRepository {
    /// Create a new page follow repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the follow of `page_id` by `user_id`.
    pub async fn find(&self, user_id: i64, page_id: i64) -> AppResult<Option<follow_page::Model>> {
        FollowPage::find()
            .filter(follow_page::Column::UserId.eq(user_id))
            .filter(follow_page::Column::PageId.eq(page_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Follow a page.
    pub async fn create(&self, user_id: i64, page_id: i64) -> AppResult<follow_page::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = FollowPage::find()
            .filter(follow_page::Column::UserId.eq(user_id))
            .filter(follow_page::Column::PageId.eq(page_id))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "This user already follows this page.".to_string(),
            ));
        }

        let model = follow_page::ActiveModel {
            user_id: Set(user_id),
            page_id: Set(page_id),
            followed_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model)
    }

    /// Unfollow a page. Returns whether a follow was removed.
    pub async fn delete(&self, user_id: i64, page_id: i64) -> AppResult<bool> {
        let result = FollowPage::delete_many()
            .filter(follow_page::Column::UserId.eq(user_id))
            .filter(follow_page::Column::PageId.eq(page_id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_follow(user_id: i64, page_id: i64) -> follow_page::Model {
        follow_page::Model {
            id: 1,
            user_id,
            page_id,
            followed_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_follow() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<follow_page::Model>::new()])
                .append_query_results([[create_test_follow(1, 2)]])
                .into_connection(),
        );

        let repo = FollowPageRepository::new(db);
        let follow = repo.create(1, 2).await.unwrap();

        assert_eq!(follow.page_id, 2);
    }

    #[tokio::test]
    async fn test_create_follow_twice() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_follow(1, 2)]])
                .into_connection(),
        );

        let repo = FollowPageRepository::new(db);
        let result = repo.create(1, 2).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_follow() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = FollowPageRepository::new(db);
        assert!(!repo.delete(1, 2).await.unwrap());
    }
}

//! Friendship repository.

use std::sync::Arc;

use crate::entities::{Friendship, friendship};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, Set, TransactionTrait,
};

/// Friendship repository for database operations.
#[derive(Clone)]
pub struct FriendshipRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendshipRepository {
    /// Create a new friendship repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a friendship by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<friendship::Model>> {
        Friendship::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find the friendship for an ordered (requester, recipient) pair.
    pub async fn find_by_pair(
        &self,
        user1_id: i64,
        user2_id: i64,
    ) -> AppResult<Option<friendship::Model>> {
        Friendship::find()
            .filter(
                Condition::all()
                    .add(friendship::Column::User1Id.eq(user1_id))
                    .add(friendship::Column::User2Id.eq(user2_id)),
            )
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a pending friendship from `user1_id` to `user2_id`.
    pub async fn create(&self, user1_id: i64, user2_id: i64) -> AppResult<friendship::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = Friendship::find()
            .filter(friendship::Column::User1Id.eq(user1_id))
            .filter(friendship::Column::User2Id.eq(user2_id))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "A friendship between these users already exists.".to_string(),
            ));
        }

        let model = friendship::ActiveModel {
            user1_id: Set(user1_id),
            user2_id: Set(user2_id),
            status: Set(friendship::FriendshipStatus::Pending),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model)
    }

    /// Change the status of a friendship.
    pub async fn set_status(
        &self,
        id: i64,
        status: friendship::FriendshipStatus,
    ) -> AppResult<friendship::Model> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Friendship {id}")))?;

        let mut active = existing.into_active_model();
        active.status = Set(status);
        active.update(self.db.as_ref()).await.map_err(map_db_err)
    }
}

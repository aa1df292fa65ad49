//! Comment repository (comments and comment reactions).

use std::sync::Arc;

use crate::actor::Actor;
use crate::entities::{Comment, CommentReaction, comment, comment_reaction};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find a comment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {id}")))
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Record a reaction. Each actor reacts to a comment at most once.
    pub async fn add_reaction(
        &self,
        comment_id: i64,
        actor: Actor,
    ) -> AppResult<comment_reaction::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = CommentReaction::find()
            .filter(comment_reaction::Column::CommentId.eq(comment_id))
            .filter(actor.condition(
                comment_reaction::Column::UserId,
                comment_reaction::Column::PageId,
            ))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "Duplicate reaction: this actor already reacted to this comment.".to_string(),
            ));
        }

        let (user_id, page_id) = actor.columns();
        let reaction = comment_reaction::ActiveModel {
            comment_id: Set(comment_id),
            user_id: Set(user_id),
            page_id: Set(page_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(reaction)
    }
}

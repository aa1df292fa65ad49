//! Post repository (posts, media attachments and post reactions).

use std::sync::Arc;

use crate::actor::Actor;
use crate::entities::{Post, PostMedia, PostReaction, post, post_media, post_reaction};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {id}")))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Media attached to a post, in display order.
    pub async fn find_media(&self, post_id: i64) -> AppResult<Vec<post_media::Model>> {
        PostMedia::find()
            .filter(post_media::Column::PostId.eq(post_id))
            .order_by_asc(post_media::Column::OrderIndex)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Attach media to a post at `order_index`, which must be free.
    pub async fn add_media(
        &self,
        post_id: i64,
        media_type: post_media::MediaType,
        media_url: String,
        order_index: i32,
    ) -> AppResult<post_media::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let taken = PostMedia::find()
            .filter(post_media::Column::PostId.eq(post_id))
            .filter(post_media::Column::OrderIndex.eq(order_index))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if taken.is_some() {
            return Err(AppError::Validation(
                "A media item with this order_index already exists on this post.".to_string(),
            ));
        }

        let media = post_media::ActiveModel {
            post_id: Set(post_id),
            media_type: Set(media_type),
            media_url: Set(media_url),
            order_index: Set(order_index),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(media)
    }

    /// Find the reaction of `actor` on a post.
    pub async fn find_reaction(
        &self,
        post_id: i64,
        actor: Actor,
    ) -> AppResult<Option<post_reaction::Model>> {
        PostReaction::find()
            .filter(post_reaction::Column::PostId.eq(post_id))
            .filter(actor.condition(post_reaction::Column::UserId, post_reaction::Column::PageId))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Record a reaction. Each actor reacts to a post at most once.
    pub async fn add_reaction(
        &self,
        post_id: i64,
        actor: Actor,
    ) -> AppResult<post_reaction::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = PostReaction::find()
            .filter(post_reaction::Column::PostId.eq(post_id))
            .filter(actor.condition(post_reaction::Column::UserId, post_reaction::Column::PageId))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "Duplicate reaction: this actor already reacted to this post.".to_string(),
            ));
        }

        let (user_id, page_id) = actor.columns();
        let reaction = post_reaction::ActiveModel {
            post_id: Set(post_id),
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_post(id: i64, actor: Actor) -> post::Model {
        let (author_user_id, author_page_id) = actor.columns();
        post::Model {
            post_id: id,
            content_text: Some("Midterm schedule is out".to_string()),
            post_type: post::PostType::Announcement,
            created_at: Utc::now().into(),
            author_user_id,
            author_page_id,
            community_id: None,
        }
    }

    fn create_test_media(post_id: i64, order_index: i32) -> post_media::Model {
        post_media::Model {
            media_id: 1,
            post_id,
            media_type: post_media::MediaType::Image,
            media_url: "https://cdn.example.edu/a.png".to_string(),
            order_index,
        }
    }

    fn create_test_reaction(post_id: i64, actor: Actor) -> post_reaction::Model {
        let (user_id, page_id) = actor.columns();
        post_reaction::Model {
            post_reaction_id: 1,
            post_id,
            user_id,
            page_id,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_returns_author() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_post(1, Actor::Page(4))]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let post = repo.find_by_id(1).await.unwrap().unwrap();

        assert_eq!(post.author(), Some(Actor::Page(4)));
    }

    #[tokio::test]
    async fn test_add_media_free_slot() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post_media::Model>::new()])
                .append_query_results([[create_test_media(1, 0)]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let media = repo
            .add_media(
                1,
                post_media::MediaType::Image,
                "https://cdn.example.edu/a.png".to_string(),
                0,
            )
            .await
            .unwrap();

        assert_eq!(media.order_index, 0);
    }

    #[tokio::test]
    async fn test_add_media_taken_slot() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_media(1, 0)]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo
            .add_media(
                1,
                post_media::MediaType::Video,
                "https://cdn.example.edu/b.mp4".to_string(),
                0,
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_reaction() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post_reaction::Model>::new()])
                .append_query_results([[create_test_reaction(1, Actor::Account(3))]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let reaction = repo.add_reaction(1, Actor::Account(3)).await.unwrap();

        assert_eq!(reaction.actor(), Some(Actor::Account(3)));
    }

    #[tokio::test]
    async fn test_add_reaction_duplicate() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_reaction(1, Actor::Page(2))]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.add_reaction(1, Actor::Page(2)).await;

        match result {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Duplicate reaction: this actor already reacted to this post.");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}

//! Post service: posts, media, comments and reactions.

use campus_common::{AppError, AppResult};
use campus_db::Actor;
use campus_db::entities::{comment, comment_reaction, post, post_media, post_reaction};
use campus_db::repositories::{
    AccountRepository, CommentRepository, CommunityRepository, PageRepository, PostRepository,
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use super::ensure_actor_exists;

pub use campus_db::entities::post::PostType;
pub use campus_db::entities::post_media::MediaType;

/// Input for creating a post.
///
/// Exactly one of `author_user_id` and `author_page_id` must be set.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostInput {
    pub content_text: Option<String>,
    #[serde(default)]
    pub post_type: PostType,
    pub author_user_id: Option<i64>,
    pub author_page_id: Option<i64>,
    pub community_id: Option<i64>,
}

/// Input for attaching media to a post.
#[derive(Debug, Deserialize, Validate)]
pub struct AddPostMediaInput {
    pub post_id: i64,
    pub media_type: MediaType,
    #[validate(url, length(max = 200))]
    pub media_url: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order_index: i32,
}

/// Input for creating a comment or a reply.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentInput {
    pub post_id: i64,
    #[validate(length(min = 1))]
    pub content: String,
    pub author_user_id: Option<i64>,
    pub author_page_id: Option<i64>,
    pub parent_comment_id: Option<i64>,
}

/// Post service.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    community_repo: CommunityRepository,
    account_repo: AccountRepository,
    page_repo: PageRepository,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        comment_repo: CommentRepository,
        community_repo: CommunityRepository,
        account_repo: AccountRepository,
        page_repo: PageRepository,
    ) -> Self {
        Self {
            post_repo,
            comment_repo,
            community_repo,
            account_repo,
            page_repo,
        }
    }

    /// Create a post authored by an account or a page.
    pub async fn create_post(&self, input: CreatePostInput) -> AppResult<post::Model> {
        input.validate()?;
        let author = Actor::try_from_columns(
            "author_user",
            input.author_user_id,
            "author_page",
            input.author_page_id,
        )?;
        ensure_actor_exists(&self.account_repo, &self.page_repo, author).await?;

        if let Some(community_id) = input.community_id {
            self.community_repo
                .find_by_id(community_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Community {community_id}")))?;
        }

        let (author_user_id, author_page_id) = author.columns();
        let model = post::ActiveModel {
            content_text: Set(input.content_text),
            post_type: Set(input.post_type),
            created_at: Set(Utc::now().into()),
            author_user_id: Set(author_user_id),
            author_page_id: Set(author_page_id),
            community_id: Set(input.community_id),
            ..Default::default()
        };

        let post = self.post_repo.create(model).await?;
        debug!(post_id = post.post_id, %author, "Post created");
        Ok(post)
    }

    /// Attach a media item to a post at a free `order_index`.
    pub async fn add_post_media(&self, input: AddPostMediaInput) -> AppResult<post_media::Model> {
        input.validate()?;
        self.post_repo.get_by_id(input.post_id).await?;

        self.post_repo
            .add_media(
                input.post_id,
                input.media_type,
                input.media_url,
                input.order_index,
            )
            .await
    }

    /// Comment on a post, or reply to a comment on the same post.
    pub async fn create_comment(&self, input: CreateCommentInput) -> AppResult<comment::Model> {
        input.validate()?;
        let author = Actor::try_from_columns(
            "author_user",
            input.author_user_id,
            "author_page",
            input.author_page_id,
        )?;
        self.post_repo.get_by_id(input.post_id).await?;
        ensure_actor_exists(&self.account_repo, &self.page_repo, author).await?;

        if let Some(parent_id) = input.parent_comment_id {
            let parent = self.comment_repo.get_by_id(parent_id).await?;
            if parent.post_id != input.post_id {
                return Err(AppError::Validation(
                    "Parent comment belongs to a different post.".to_string(),
                ));
            }
        }

        let (author_user_id, author_page_id) = author.columns();
        let model = comment::ActiveModel {
            post_id: Set(input.post_id),
            content: Set(input.content),
            created_at: Set(Utc::now().into()),
            author_user_id: Set(author_user_id),
            author_page_id: Set(author_page_id),
            parent_comment_id: Set(input.parent_comment_id),
            ..Default::default()
        };

        self.comment_repo.create(model).await
    }

    /// React to a post. One reaction per actor per post.
    pub async fn react_to_post(
        &self,
        post_id: i64,
        actor: Actor,
    ) -> AppResult<post_reaction::Model> {
        self.post_repo.get_by_id(post_id).await?;
        ensure_actor_exists(&self.account_repo, &self.page_repo, actor).await?;

        self.post_repo.add_reaction(post_id, actor).await
    }

    /// React to a comment. One reaction per actor per comment.
    pub async fn react_to_comment(
        &self,
        comment_id: i64,
        actor: Actor,
    ) -> AppResult<comment_reaction::Model> {
        self.comment_repo.get_by_id(comment_id).await?;
        ensure_actor_exists(&self.account_repo, &self.page_repo, actor).await?;

        self.comment_repo.add_reaction(comment_id, actor).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_db::entities::{account, page};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> PostService {
        let db = Arc::new(db);
        PostService::new(
            PostRepository::new(Arc::clone(&db)),
            CommentRepository::new(Arc::clone(&db)),
            CommunityRepository::new(Arc::clone(&db)),
            AccountRepository::new(Arc::clone(&db)),
            PageRepository::new(db),
        )
    }

    fn create_test_account(id: i64) -> account::Model {
        account::Model {
            id,
            username: format!("user{id}"),
            password: "hash".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            last_login: None,
            date_joined: Utc::now().into(),
        }
    }

    fn create_test_page(page_id: i64) -> page::Model {
        page::Model {
            page_id,
            page_name: "Faculty of Science".to_string(),
            page_type: "department".to_string(),
            description: None,
            verified: true,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_post(post_id: i64, author: Actor) -> post::Model {
        post::Model {
            post_id,
            content_text: Some("Hello campus".to_string()),
            post_type: PostType::Normal,
            created_at: Utc::now().into(),
            author_user_id: author.user_id(),
            author_page_id: author.page_id(),
            community_id: None,
        }
    }

    fn create_test_comment(comment_id: i64, post_id: i64) -> comment::Model {
        comment::Model {
            comment_id,
            post_id,
            content: "Nice".to_string(),
            created_at: Utc::now().into(),
            author_user_id: Some(1),
            author_page_id: None,
            parent_comment_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_post_requires_exactly_one_author() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        for (user, page) in [(Some(1), Some(2)), (None, None)] {
            let result = svc
                .create_post(CreatePostInput {
                    content_text: Some("hi".to_string()),
                    post_type: PostType::Normal,
                    author_user_id: user,
                    author_page_id: page,
                    community_id: None,
                })
                .await;

            match result {
                Err(AppError::Validation(msg)) => assert!(msg.contains("author_user")),
                other => panic!("Expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_create_post_by_page() {
        let created = create_test_post(10, Actor::Page(2));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_page(2)]])
            .append_query_results([[created.clone()]])
            .into_connection();

        let post = service(db)
            .create_post(CreatePostInput {
                content_text: Some("Hello campus".to_string()),
                post_type: PostType::Announcement,
                author_user_id: None,
                author_page_id: Some(2),
                community_id: None,
            })
            .await
            .unwrap();

        assert_eq!(post.author_page_id, Some(2));
        assert_eq!(post.author_user_id, None);
    }

    #[tokio::test]
    async fn test_create_post_unknown_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<account::Model>::new()])
            .into_connection();

        let result = service(db)
            .create_post(CreatePostInput {
                content_text: None,
                post_type: PostType::Normal,
                author_user_id: Some(8),
                author_page_id: None,
                community_id: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_add_post_media_input_validation() {
        let negative = AddPostMediaInput {
            post_id: 1,
            media_type: MediaType::Image,
            media_url: "https://cdn.example.com/a.png".to_string(),
            order_index: -1,
        };
        assert!(negative.validate().is_err());

        let bad_url = AddPostMediaInput {
            post_id: 1,
            media_type: MediaType::Url,
            media_url: "not a url".to_string(),
            order_index: 0,
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_add_post_media_url_fits_column() {
        let prefix = "https://cdn.example.com/";
        let media = |len: usize| AddPostMediaInput {
            post_id: 1,
            media_type: MediaType::Image,
            media_url: format!("{prefix}{}", "a".repeat(len - prefix.len())),
            order_index: 0,
        };

        assert!(media(200).validate().is_ok());
        assert!(media(201).validate().is_err());
    }

    #[tokio::test]
    async fn test_create_comment_requires_exactly_one_author() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        for (user, page) in [(Some(1), Some(2)), (None, None)] {
            let result = svc
                .create_comment(CreateCommentInput {
                    post_id: 10,
                    content: "Nice".to_string(),
                    author_user_id: user,
                    author_page_id: page,
                    parent_comment_id: None,
                })
                .await;

            match result {
                Err(AppError::Validation(msg)) => assert!(msg.contains("author_user")),
                other => panic!("Expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_add_post_media_duplicate_order_index() {
        let existing = post_media::Model {
            media_id: 1,
            post_id: 10,
            media_type: MediaType::Image,
            media_url: "https://cdn.example.com/a.png".to_string(),
            order_index: 0,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_post(10, Actor::Account(1))]])
            .append_query_results([[existing]])
            .into_connection();

        let result = service(db)
            .add_post_media(AddPostMediaInput {
                post_id: 10,
                media_type: MediaType::Video,
                media_url: "https://cdn.example.com/b.mp4".to_string(),
                order_index: 0,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_reply_must_share_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_post(10, Actor::Account(1))]])
            .append_query_results([[create_test_account(1)]])
            .append_query_results([[create_test_comment(5, 99)]])
            .into_connection();

        let result = service(db)
            .create_comment(CreateCommentInput {
                post_id: 10,
                content: "reply".to_string(),
                author_user_id: Some(1),
                author_page_id: None,
                parent_comment_id: Some(5),
            })
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("different post")),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_react_to_post_twice_rejected() {
        let existing = post_reaction::Model {
            post_reaction_id: 1,
            post_id: 10,
            user_id: Some(1),
            page_id: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_post(10, Actor::Account(1))]])
            .append_query_results([[create_test_account(1)]])
            .append_query_results([[existing]])
            .into_connection();

        let result = service(db).react_to_post(10, Actor::Account(1)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_react_to_comment_by_page() {
        let created = comment_reaction::Model {
            comment_reaction_id: 3,
            comment_id: 5,
            user_id: None,
            page_id: Some(2),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_comment(5, 10)]])
            .append_query_results([[create_test_page(2)]])
            .append_query_results([Vec::<comment_reaction::Model>::new()])
            .append_query_results([[created.clone()]])
            .into_connection();

        let reaction = service(db)
            .react_to_comment(5, Actor::Page(2))
            .await
            .unwrap();
        assert_eq!(reaction, created);
    }
}

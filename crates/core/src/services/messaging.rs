//! Messaging service: conversations, members, messages, media and reactions.

use std::collections::HashSet;

use campus_common::{AppError, AppResult};
use campus_db::Actor;
use campus_db::entities::{
    conversation, conversation_member, message, message_media, message_reaction,
};
use campus_db::repositories::{AccountRepository, MessagingRepository, PageRepository};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use super::ensure_actor_exists;

pub use campus_db::entities::community_member::MemberRole;
pub use campus_db::entities::post_media::MediaType;

/// Input for sending a message.
///
/// Exactly one of `sender_user_id` and `sender_page_id` must be set.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageInput {
    pub conversation_id: i64,
    pub content: Option<String>,
    pub sender_user_id: Option<i64>,
    pub sender_page_id: Option<i64>,
}

/// Input for attaching media to a message.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMessageMediaInput {
    pub message_id: i64,
    pub media_type: MediaType,
    #[validate(url, length(max = 200))]
    pub media_url: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order_index: i32,
}

/// Input for reacting to a message.
#[derive(Debug, Deserialize, Validate)]
pub struct ReactToMessageInput {
    pub message_id: i64,
    pub actor: Actor,
    #[validate(length(min = 1, max = 50))]
    pub reaction_type: String,
}

/// Messaging service.
#[derive(Clone)]
pub struct MessagingService {
    messaging_repo: MessagingRepository,
    account_repo: AccountRepository,
    page_repo: PageRepository,
}

impl MessagingService {
    /// Create a new messaging service.
    #[must_use]
    pub const fn new(
        messaging_repo: MessagingRepository,
        account_repo: AccountRepository,
        page_repo: PageRepository,
    ) -> Self {
        Self {
            messaging_repo,
            account_repo,
            page_repo,
        }
    }

    /// Start a conversation with its initial members.
    pub async fn create_conversation(
        &self,
        is_group: bool,
        members: Vec<(Actor, MemberRole)>,
    ) -> AppResult<(conversation::Model, Vec<conversation_member::Model>)> {
        let mut seen = HashSet::with_capacity(members.len());
        for &(actor, _) in &members {
            if !seen.insert(actor) {
                return Err(AppError::Validation(
                    "Duplicate member: this actor is already in this conversation.".to_string(),
                ));
            }
            ensure_actor_exists(&self.account_repo, &self.page_repo, actor).await?;
        }

        let (conversation, members) = self
            .messaging_repo
            .create_conversation(is_group, &members)
            .await?;
        debug!(
            conversation_id = conversation.conversation_id,
            members = members.len(),
            "Conversation created"
        );
        Ok((conversation, members))
    }

    /// Add an account or page to a conversation.
    pub async fn add_member(
        &self,
        conversation_id: i64,
        actor: Actor,
        role: MemberRole,
    ) -> AppResult<conversation_member::Model> {
        self.messaging_repo.get_conversation(conversation_id).await?;
        ensure_actor_exists(&self.account_repo, &self.page_repo, actor).await?;

        self.messaging_repo
            .add_member(conversation_id, actor, role)
            .await
    }

    /// Send a message. The sender must be a member of the conversation.
    pub async fn send_message(&self, input: SendMessageInput) -> AppResult<message::Model> {
        input.validate()?;
        let sender = Actor::try_from_columns(
            "sender_user",
            input.sender_user_id,
            "sender_page",
            input.sender_page_id,
        )?;
        self.messaging_repo
            .get_conversation(input.conversation_id)
            .await?;

        if self
            .messaging_repo
            .find_member(input.conversation_id, sender)
            .await?
            .is_none()
        {
            return Err(AppError::Forbidden(format!(
                "{sender} is not a member of this conversation"
            )));
        }

        let (sender_user_id, sender_page_id) = sender.columns();
        let model = message::ActiveModel {
            conversation_id: Set(input.conversation_id),
            content: Set(input.content),
            sender_user_id: Set(sender_user_id),
            sender_page_id: Set(sender_page_id),
            sent_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.messaging_repo.create_message(model).await
    }

    /// Attach a media item to a message at a free `order_index`.
    pub async fn add_message_media(
        &self,
        input: AddMessageMediaInput,
    ) -> AppResult<message_media::Model> {
        input.validate()?;
        self.messaging_repo.get_message(input.message_id).await?;

        self.messaging_repo
            .add_media(
                input.message_id,
                input.media_type,
                input.media_url,
                input.order_index,
            )
            .await
    }

    /// React to a message. Each actor uses each reaction type once per message.
    pub async fn react_to_message(
        &self,
        input: ReactToMessageInput,
    ) -> AppResult<message_reaction::Model> {
        input.validate()?;
        self.messaging_repo.get_message(input.message_id).await?;
        ensure_actor_exists(&self.account_repo, &self.page_repo, input.actor).await?;

        self.messaging_repo
            .add_reaction(input.message_id, input.actor, input.reaction_type)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_db::entities::{account, page};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> MessagingService {
        let db = Arc::new(db);
        MessagingService::new(
            MessagingRepository::new(Arc::clone(&db)),
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
            page_name: "Student Union".to_string(),
            page_type: "organization".to_string(),
            description: None,
            verified: false,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_conversation(id: i64) -> conversation::Model {
        conversation::Model {
            conversation_id: id,
            created_at: Utc::now().into(),
            is_group: false,
        }
    }

    fn create_test_member(id: i64, conversation_id: i64, actor: Actor) -> conversation_member::Model {
        conversation_member::Model {
            id,
            conversation_id,
            user_id: actor.user_id(),
            page_id: actor.page_id(),
            role: MemberRole::Member,
        }
    }

    fn create_test_message(message_id: i64) -> message::Model {
        message::Model {
            message_id,
            conversation_id: 1,
            content: Some("hi".to_string()),
            sender_user_id: Some(1),
            sender_page_id: None,
            sent_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_conversation_rejects_repeated_actor() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_account(1)]])
            .into_connection();

        let result = service(db)
            .create_conversation(
                false,
                vec![
                    (Actor::Account(1), MemberRole::Owner),
                    (Actor::Account(1), MemberRole::Member),
                ],
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_conversation_with_account_and_page() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_account(1)]])
            .append_query_results([[create_test_page(2)]])
            .append_query_results([[create_test_conversation(7)]])
            .append_query_results([[create_test_member(1, 7, Actor::Account(1))]])
            .append_query_results([[create_test_member(2, 7, Actor::Page(2))]])
            .into_connection();

        let (conversation, members) = service(db)
            .create_conversation(
                false,
                vec![
                    (Actor::Account(1), MemberRole::Owner),
                    (Actor::Page(2), MemberRole::Member),
                ],
            )
            .await
            .unwrap();

        assert_eq!(conversation.conversation_id, 7);
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].page_id, Some(2));
    }

    #[tokio::test]
    async fn test_send_message_requires_single_sender() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = svc
            .send_message(SendMessageInput {
                conversation_id: 1,
                content: Some("hi".to_string()),
                sender_user_id: Some(1),
                sender_page_id: Some(2),
            })
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("sender_user")),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_non_member_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_conversation(1)]])
            .append_query_results([Vec::<conversation_member::Model>::new()])
            .into_connection();

        let result = service(db)
            .send_message(SendMessageInput {
                conversation_id: 1,
                content: Some("hi".to_string()),
                sender_user_id: Some(1),
                sender_page_id: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_send_message_as_member() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_conversation(1)]])
            .append_query_results([[create_test_member(1, 1, Actor::Account(1))]])
            .append_query_results([[create_test_message(3)]])
            .into_connection();

        let message = service(db)
            .send_message(SendMessageInput {
                conversation_id: 1,
                content: Some("hi".to_string()),
                sender_user_id: Some(1),
                sender_page_id: None,
            })
            .await
            .unwrap();

        assert_eq!(message.message_id, 3);
    }

    #[test]
    fn test_reaction_type_length() {
        let too_long = ReactToMessageInput {
            message_id: 1,
            actor: Actor::Account(1),
            reaction_type: "x".repeat(51),
        };
        assert!(too_long.validate().is_err());

        let empty = ReactToMessageInput {
            message_id: 1,
            actor: Actor::Account(1),
            reaction_type: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[tokio::test]
    async fn test_react_to_message_same_type_twice_rejected() {
        let existing = message_reaction::Model {
            message_reaction_id: 1,
            message_id: 3,
            user_id: Some(1),
            page_id: None,
            message_reaction_type: "like".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_message(3)]])
            .append_query_results([[create_test_account(1)]])
            .append_query_results([[existing]])
            .into_connection();

        let result = service(db)
            .react_to_message(ReactToMessageInput {
                message_id: 3,
                actor: Actor::Account(1),
                reaction_type: "like".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_message_media_url_fits_column() {
        let prefix = "https://cdn.example.com/";
        let media = |len: usize| AddMessageMediaInput {
            message_id: 3,
            media_type: MediaType::Image,
            media_url: format!("{prefix}{}", "m".repeat(len - prefix.len())),
            order_index: 0,
        };

        assert!(media(200).validate().is_ok());
        assert!(media(201).validate().is_err());
    }

    #[tokio::test]
    async fn test_add_message_media_duplicate_order_index() {
        let existing = message_media::Model {
            media_id: 1,
            message_id: 3,
            media_type: MediaType::Image,
            media_url: "https://cdn.example.com/a.png".to_string(),
            order_index: 0,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_message(3)]])
            .append_query_results([[existing]])
            .into_connection();

        let result = service(db)
            .add_message_media(AddMessageMediaInput {
                message_id: 3,
                media_type: MediaType::Video,
                media_url: "https://cdn.example.com/b.mp4".to_string(),
                order_index: 0,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

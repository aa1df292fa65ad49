//! Messaging repository (conversations, members, messages, media and reactions).

use std::sync::Arc;

use crate::actor::Actor;
use crate::entities::{
    Conversation, ConversationMember, Message, MessageMedia, MessageReaction, community_member,
    conversation, conversation_member, message, message_media, message_reaction, post_media,
};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};

/// Messaging repository for database operations.
#[derive(Clone)]
pub struct MessagingRepository {
    db: Arc<DatabaseConnection>,
}

impl MessagingRepository {
    /// Create a new messaging repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a conversation by ID.
    pub async fn find_conversation(&self, id: i64) -> AppResult<Option<conversation::Model>> {
        Conversation::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find a conversation by ID, returning an error if not found.
    pub async fn get_conversation(&self, id: i64) -> AppResult<conversation::Model> {
        self.find_conversation(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Conversation {id}")))
    }

    /// Create a conversation and its initial members in one transaction.
    ///
    /// `members` must not repeat an actor.
    pub async fn create_conversation(
        &self,
        is_group: bool,
        members: &[(Actor, community_member::MemberRole)],
    ) -> AppResult<(conversation::Model, Vec<conversation_member::Model>)> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let conversation = conversation::ActiveModel {
            created_at: Set(Utc::now().into()),
            is_group: Set(is_group),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        let mut inserted = Vec::with_capacity(members.len());
        for &(actor, role) in members {
            inserted.push(insert_member(&txn, conversation.conversation_id, actor, role).await?);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok((conversation, inserted))
    }

    /// Find the membership of `actor` in a conversation.
    pub async fn find_member(
        &self,
        conversation_id: i64,
        actor: Actor,
    ) -> AppResult<Option<conversation_member::Model>> {
        ConversationMember::find()
            .filter(conversation_member::Column::ConversationId.eq(conversation_id))
            .filter(actor.condition(
                conversation_member::Column::UserId,
                conversation_member::Column::PageId,
            ))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Add a member. An actor joins a conversation at most once.
    pub async fn add_member(
        &self,
        conversation_id: i64,
        actor: Actor,
        role: community_member::MemberRole,
    ) -> AppResult<conversation_member::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = ConversationMember::find()
            .filter(conversation_member::Column::ConversationId.eq(conversation_id))
            .filter(actor.condition(
                conversation_member::Column::UserId,
                conversation_member::Column::PageId,
            ))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "Duplicate member: this actor is already in this conversation.".to_string(),
            ));
        }

        let member = insert_member(&txn, conversation_id, actor, role).await?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(member)
    }

    /// Find a message by ID.
    pub async fn find_message(&self, id: i64) -> AppResult<Option<message::Model>> {
        Message::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find a message by ID, returning an error if not found.
    pub async fn get_message(&self, id: i64) -> AppResult<message::Model> {
        self.find_message(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {id}")))
    }

    /// Create a new message.
    pub async fn create_message(&self, model: message::ActiveModel) -> AppResult<message::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Attach media to a message at `order_index`, which must be free.
    pub async fn add_media(
        &self,
        message_id: i64,
        media_type: post_media::MediaType,
        media_url: String,
        order_index: i32,
    ) -> AppResult<message_media::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let taken = MessageMedia::find()
            .filter(message_media::Column::MessageId.eq(message_id))
            .filter(message_media::Column::OrderIndex.eq(order_index))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if taken.is_some() {
            return Err(AppError::Validation(
                "A media item with this order_index already exists on this message.".to_string(),
            ));
        }

        let media = message_media::ActiveModel {
            message_id: Set(message_id),
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

    /// Record a reaction. Each actor uses each reaction type once per message.
    pub async fn add_reaction(
        &self,
        message_id: i64,
        actor: Actor,
        reaction_type: String,
    ) -> AppResult<message_reaction::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = MessageReaction::find()
            .filter(message_reaction::Column::MessageId.eq(message_id))
            .filter(message_reaction::Column::MessageReactionType.eq(reaction_type.as_str()))
            .filter(actor.condition(
                message_reaction::Column::UserId,
                message_reaction::Column::PageId,
            ))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "Duplicate reaction: this actor already used this reaction type on this message."
                    .to_string(),
            ));
        }

        let (user_id, page_id) = actor.columns();
        let reaction = message_reaction::ActiveModel {
            message_id: Set(message_id),
            user_id: Set(user_id),
            page_id: Set(page_id),
            message_reaction_type: Set(reaction_type),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(reaction)
    }
}

async fn insert_member<C: ConnectionTrait>(
    conn: &C,
    conversation_id: i64,
    actor: Actor,
    role: community_member::MemberRole,
) -> AppResult<conversation_member::Model> {
    let (user_id, page_id) = actor.columns();
    conversation_member::ActiveModel {
        conversation_id: Set(conversation_id),
        user_id: Set(user_id),
        page_id: Set(page_id),
        role: Set(role),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(map_db_err)
}

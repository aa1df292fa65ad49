//! Message entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actor::Actor;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub message_id: i64,

    #[sea_orm(indexed)]
    pub conversation_id: i64,

    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    #[sea_orm(nullable)]
    pub sender_user_id: Option<i64>,

    #[sea_orm(nullable)]
    pub sender_page_id: Option<i64>,

    pub sent_at: DateTimeWithTimeZone,
}

impl Model {
    /// The sender, or `None` if the row violates the sender invariant.
    #[must_use]
    pub const fn sender(&self) -> Option<Actor> {
        Actor::from_columns(self.sender_user_id, self.sender_page_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::conversation::Entity",
        from = "Column::ConversationId",
        to = "super::conversation::Column::ConversationId",
        on_delete = "Cascade"
    )]
    Conversation,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::SenderUserId",
        to = "super::account::Column::Id",
        on_delete = "SetNull"
    )]
    SenderUser,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::SenderPageId",
        to = "super::page::Column::PageId",
        on_delete = "SetNull"
    )]
    SenderPage,
    #[sea_orm(has_many = "super::message_media::Entity")]
    Media,
}

impl Related<super::conversation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conversation.def()
    }
}

impl Related<super::message_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Conversation member entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::community_member::MemberRole;
use crate::actor::Actor;

/// An account or page taking part in a conversation.
///
/// Deleting the account or page keeps the membership row with the
/// reference nulled out.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conversation_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(indexed)]
    pub conversation_id: i64,

    #[sea_orm(nullable)]
    pub user_id: Option<i64>,

    #[sea_orm(nullable)]
    pub page_id: Option<i64>,

    pub role: MemberRole,
}

impl Model {
    /// The member actor, or `None` if the row violates the actor invariant.
    #[must_use]
    pub const fn actor(&self) -> Option<Actor> {
        Actor::from_columns(self.user_id, self.page_id)
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
        from = "Column::UserId",
        to = "super::account::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::PageId",
        on_delete = "SetNull"
    )]
    Page,
}

impl Related<super::conversation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conversation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

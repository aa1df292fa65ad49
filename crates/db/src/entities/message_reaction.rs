//! Message reaction entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actor::Actor;

/// One reaction of each type per actor per message.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message_reaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub message_reaction_id: i64,

    #[sea_orm(indexed)]
    pub message_id: i64,

    #[sea_orm(nullable)]
    pub user_id: Option<i64>,

    #[sea_orm(nullable)]
    pub page_id: Option<i64>,

    /// Reaction kind, e.g. an emoji or a short name
    pub message_reaction_type: String,
}

impl Model {
    /// The reacting actor, or `None` if the row violates the actor invariant.
    #[must_use]
    pub const fn actor(&self) -> Option<Actor> {
        Actor::from_columns(self.user_id, self.page_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::message::Entity",
        from = "Column::MessageId",
        to = "super::message::Column::MessageId",
        on_delete = "Cascade"
    )]
    Message,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::PageId",
        on_delete = "Cascade"
    )]
    Page,
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

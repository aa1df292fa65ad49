//! Comment entity (threaded via `parent_comment_id`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actor::Actor;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub comment_id: i64,

    #[sea_orm(indexed)]
    pub post_id: i64,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub author_user_id: Option<i64>,

    #[sea_orm(nullable)]
    pub author_page_id: Option<i64>,

    /// `None` for top-level comments
    #[sea_orm(indexed, nullable)]
    pub parent_comment_id: Option<i64>,
}

impl Model {
    /// The author, or `None` if the row violates the author invariant.
    #[must_use]
    pub const fn author(&self) -> Option<Actor> {
        Actor::from_columns(self.author_user_id, self.author_page_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::PostId",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AuthorUserId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    AuthorUser,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::AuthorPageId",
        to = "super::page::Column::PageId",
        on_delete = "Cascade"
    )]
    AuthorPage,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentCommentId",
        to = "Column::CommentId",
        on_delete = "Cascade"
    )]
    Parent,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

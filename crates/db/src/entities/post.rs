//! Post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actor::Actor;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    #[sea_orm(string_value = "announcement")]
    Announcement,
    #[sea_orm(string_value = "advertisement")]
    Advertisement,
    #[sea_orm(string_value = "academy")]
    Academy,
    #[sea_orm(string_value = "normal")]
    #[default]
    Normal,
}

/// A post authored by exactly one of an account or a page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub post_id: i64,

    #[sea_orm(column_type = "Text", nullable)]
    pub content_text: Option<String>,

    pub post_type: PostType,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(indexed, nullable)]
    pub author_user_id: Option<i64>,

    #[sea_orm(indexed, nullable)]
    pub author_page_id: Option<i64>,

    /// Community the post was published in, if any
    #[sea_orm(indexed, nullable)]
    pub community_id: Option<i64>,
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
        belongs_to = "super::account::Entity",
        from = "Column::AuthorUserId",
        to = "super::account::Column::Id",
        on_delete = "SetNull"
    )]
    AuthorUser,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::AuthorPageId",
        to = "super::page::Column::PageId",
        on_delete = "SetNull"
    )]
    AuthorPage,
    #[sea_orm(
        belongs_to = "super::community::Entity",
        from = "Column::CommunityId",
        to = "super::community::Column::CommunityId",
        on_delete = "SetNull"
    )]
    Community,
    #[sea_orm(has_many = "super::post_media::Entity")]
    Media,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthorUser.def()
    }
}

impl Related<super::post_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

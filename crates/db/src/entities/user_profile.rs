//! User profile entity (1:1 extension of an account).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Presence status shown on a profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(12))")]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    #[sea_orm(string_value = "online")]
    #[default]
    Online,
    #[sea_orm(string_value = "away")]
    Away,
    /// Do not disturb.
    #[sea_orm(string_value = "dnd")]
    Dnd,
    #[sea_orm(string_value = "offline")]
    Offline,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning account (one profile per account)
    #[sea_orm(unique)]
    pub user_id: i64,

    /// Display name (may be empty)
    pub full_name: String,

    /// Avatar URL
    #[sea_orm(nullable)]
    pub profile_image: Option<String>,

    /// Banner URL
    #[sea_orm(nullable)]
    pub banner_image: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    pub status: ProfileStatus,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

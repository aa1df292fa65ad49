//! Issued refresh token record.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outstanding_token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Token ID claim
    #[sea_orm(unique)]
    pub jti: String,

    #[sea_orm(indexed, nullable)]
    pub user_id: Option<i64>,

    #[sea_orm(column_type = "Text")]
    #[serde(skip_serializing)]
    pub token: String,

    pub created_at: DateTimeWithTimeZone,

    pub expires_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id",
        on_delete = "SetNull"
    )]
    Account,
    #[sea_orm(has_one = "super::blacklisted_token::Entity")]
    Blacklist,
}

impl Related<super::blacklisted_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blacklist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

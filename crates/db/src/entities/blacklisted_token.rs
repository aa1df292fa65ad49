//! Revoked refresh token record.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blacklisted_token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The revoked `outstanding_token` row
    #[sea_orm(unique)]
    pub token_id: i64,

    pub blacklisted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outstanding_token::Entity",
        from = "Column::TokenId",
        to = "super::outstanding_token::Column::Id",
        on_delete = "Cascade"
    )]
    OutstandingToken,
}

impl Related<super::outstanding_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutstandingToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Message media attachment entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::post_media::MediaType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message_media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub media_id: i64,

    pub message_id: i64,

    pub media_type: MediaType,

    pub media_url: String,

    /// Position in the attachment list, unique per message
    pub order_index: i32,
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
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

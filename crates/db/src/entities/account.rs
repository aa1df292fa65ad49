//! Account entity (login identity).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Unique login handle
    #[sea_orm(unique)]
    pub username: String,

    /// Password hash (Argon2 PHC string), never the plaintext
    #[serde(skip_serializing)]
    pub password: String,

    /// Email address (may be empty)
    pub email: String,

    pub first_name: String,

    pub last_name: String,

    /// Can log in?
    #[sea_orm(default_value = true)]
    pub is_active: bool,

    /// Can access the admin site?
    #[sea_orm(default_value = false)]
    pub is_staff: bool,

    /// Has all permissions?
    #[sea_orm(default_value = false)]
    pub is_superuser: bool,

    #[sea_orm(nullable)]
    pub last_login: Option<DateTimeWithTimeZone>,

    pub date_joined: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_profile::Entity")]
    Profile,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

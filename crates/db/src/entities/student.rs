//! Student role entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum AcademicLevel {
    #[sea_orm(string_value = "diploma")]
    Diploma,
    #[sea_orm(string_value = "bachelor")]
    Bachelor,
    #[sea_orm(string_value = "master")]
    Master,
    #[sea_orm(string_value = "phd")]
    Phd,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    #[sea_orm(nullable)]
    pub university_page_id: Option<i64>,

    /// Free text for now (may be empty)
    pub major: String,

    #[sea_orm(nullable)]
    pub academic_level: Option<AcademicLevel>,
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
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::UniversityPageId",
        to = "super::page::Column::PageId",
        on_delete = "SetNull"
    )]
    UniversityPage,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UniversityPage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Instructor role entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum AcademicTitle {
    #[sea_orm(string_value = "dr")]
    Dr,
    #[sea_orm(string_value = "prof")]
    Prof,
    #[sea_orm(string_value = "asst")]
    Asst,
    #[sea_orm(string_value = "lecturer")]
    Lecturer,
    #[sea_orm(string_value = "adviser")]
    Adviser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum InstructorType {
    #[sea_orm(string_value = "full_time")]
    FullTime,
    #[sea_orm(string_value = "part_time")]
    PartTime,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    #[sea_orm(nullable)]
    pub academic_title: Option<AcademicTitle>,

    /// Department name (may be empty)
    pub department: String,

    #[sea_orm(nullable)]
    pub instructor_type: Option<InstructorType>,

    /// University page this instructor belongs to
    #[sea_orm(nullable)]
    pub university_page_id: Option<i64>,
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

//! Moderation report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category of reported content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "snake_case")]
pub enum ReportContentType {
    #[sea_orm(string_value = "harassment_abuse")]
    HarassmentAbuse,
    #[sea_orm(string_value = "violence_harm")]
    ViolenceHarm,
    #[sea_orm(string_value = "sexual_content_exploitation")]
    SexualContentExploitation,
    #[sea_orm(string_value = "child_safety")]
    ChildSafety,
    #[sea_orm(string_value = "hate_extremism")]
    HateExtremism,
    #[sea_orm(string_value = "self_harm_dangerous_behavior")]
    SelfHarmDangerousBehavior,
    #[sea_orm(string_value = "misinformation_manipulation")]
    MisinformationManipulation,
    #[sea_orm(string_value = "privacy_impersonation")]
    PrivacyImpersonation,
    #[sea_orm(string_value = "spam_scams_fraud")]
    SpamScamsFraud,
    #[sea_orm(string_value = "illegal_ip_violations")]
    IllegalIpViolations,
}

/// Outcome of a moderation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "snake_case")]
pub enum FinalAction {
    #[sea_orm(string_value = "content_removal")]
    ContentRemoval,
    /// Warning or strike.
    #[sea_orm(string_value = "warning_strike")]
    WarningStrike,
    /// Limited features or a short suspension.
    #[sea_orm(string_value = "temp_restriction")]
    TempRestriction,
    #[sea_orm(string_value = "temp_suspension")]
    TempSuspension,
    #[sea_orm(string_value = "permanent_ban")]
    PermanentBan,
    #[sea_orm(string_value = "account_deletion")]
    AccountDeletion,
    /// Warning or sensitive-content label.
    #[sea_orm(string_value = "content_labeling")]
    ContentLabeling,
    /// Severe illegal cases.
    #[sea_orm(string_value = "report_authorities")]
    ReportAuthorities,
}

/// Report model.
///
/// Unlike the other dual-actor tables, the reporter columns carry no
/// exactly-one rule: both, either or neither may be set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub report_id: i64,

    #[sea_orm(nullable)]
    pub reporter_user_id: Option<i64>,

    #[sea_orm(nullable)]
    pub reporter_page_id: Option<i64>,

    /// ID of the reported row; its table is implied by the content
    pub reported_content_id: i64,

    pub content_type: ReportContentType,

    #[sea_orm(column_type = "Text")]
    pub reason: String,

    pub final_action: FinalAction,

    /// University page the report is routed to
    #[sea_orm(nullable)]
    pub university_page_id: Option<i64>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::ReporterUserId",
        to = "super::account::Column::Id",
        on_delete = "SetNull"
    )]
    ReporterUser,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::ReporterPageId",
        to = "super::page::Column::PageId",
        on_delete = "SetNull"
    )]
    ReporterPage,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::UniversityPageId",
        to = "super::page::Column::PageId",
        on_delete = "SetNull"
    )]
    UniversityPage,
}

impl ActiveModelBehavior for ActiveModel {}

//! Moderation service: content reports.

use campus_common::AppResult;
use campus_db::entities::report;
use campus_db::repositories::{AccountRepository, PageRepository, ReportRepository};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

pub use campus_db::entities::report::{FinalAction, ReportContentType};

/// Input for filing a report.
///
/// Both reporter references are optional and may be set together.
#[derive(Debug, Deserialize, Validate)]
pub struct FileReportInput {
    pub reporter_user_id: Option<i64>,
    pub reporter_page_id: Option<i64>,
    pub reported_content_id: i64,
    pub content_type: ReportContentType,
    #[validate(length(min = 1))]
    pub reason: String,
    pub final_action: FinalAction,
    pub university_page_id: Option<i64>,
}

/// Moderation service.
#[derive(Clone)]
pub struct ModerationService {
    report_repo: ReportRepository,
    account_repo: AccountRepository,
    page_repo: PageRepository,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        account_repo: AccountRepository,
        page_repo: PageRepository,
    ) -> Self {
        Self {
            report_repo,
            account_repo,
            page_repo,
        }
    }

    /// File a report. Every referenced account and page must exist.
    pub async fn file_report(&self, input: FileReportInput) -> AppResult<report::Model> {
        input.validate()?;
        if let Some(user_id) = input.reporter_user_id {
            self.account_repo.get_by_id(user_id).await?;
        }
        for page_id in [input.reporter_page_id, input.university_page_id]
            .into_iter()
            .flatten()
        {
            self.page_repo.get_by_id(page_id).await?;
        }

        let model = report::ActiveModel {
            reporter_user_id: Set(input.reporter_user_id),
            reporter_page_id: Set(input.reporter_page_id),
            reported_content_id: Set(input.reported_content_id),
            content_type: Set(input.content_type),
            reason: Set(input.reason),
            final_action: Set(input.final_action),
            university_page_id: Set(input.university_page_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let report = self.report_repo.create(model).await?;
        info!(
            report_id = report.report_id,
            content_id = report.reported_content_id,
            "Report filed"
        );
        Ok(report)
    }
}

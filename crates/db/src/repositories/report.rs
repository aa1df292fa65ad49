//! Report repository.

use std::sync::Arc;

use crate::entities::{Report, report};
use crate::map_db_err;
use campus_common::AppResult;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Report repository for database operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<report::Model>> {
        Report::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a new report.
    pub async fn create(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Reports routed to a university page, newest first.
    pub async fn find_by_university_page(
        &self,
        page_id: i64,
        limit: u64,
    ) -> AppResult<Vec<report::Model>> {
        Report::find()
            .filter(report::Column::UniversityPageId.eq(page_id))
            .order_by_desc(report::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_university_page() {
        let report = report::Model {
            report_id: 1,
            reporter_user_id: Some(3),
            reporter_page_id: None,
            reported_content_id: 42,
            content_type: report::ReportContentType::SpamScamsFraud,
            reason: "Phishing link".to_string(),
            final_action: report::FinalAction::ContentRemoval,
            university_page_id: Some(7),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[report]])
                .into_connection(),
        );

        let repo = ReportRepository::new(db);
        let reports = repo.find_by_university_page(7, 50).await.unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].content_type,
            report::ReportContentType::SpamScamsFraud
        );
    }
}

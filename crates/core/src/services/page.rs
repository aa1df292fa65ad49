//! Page service.

use campus_common::AppResult;
use campus_db::entities::page;
use campus_db::repositories::PageRepository;
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Input for creating a page.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePageInput {
    #[validate(length(min = 1, max = 255))]
    pub page_name: String,
    #[validate(length(min = 1, max = 50))]
    pub page_type: String,
    pub description: Option<String>,
}

/// Service for organizational pages.
#[derive(Clone)]
pub struct PageService {
    page_repo: PageRepository,
}

impl PageService {
    /// Create a new page service.
    #[must_use]
    pub const fn new(page_repo: PageRepository) -> Self {
        Self { page_repo }
    }

    /// Create a page. New pages start unverified.
    pub async fn create(&self, input: CreatePageInput) -> AppResult<page::Model> {
        input.validate()?;

        let model = page::ActiveModel {
            page_name: Set(input.page_name),
            page_type: Set(input.page_type),
            description: Set(input.description),
            verified: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let page = self.page_repo.create(model).await?;
        info!(page_id = page.page_id, page_type = %page.page_type, "Page created");
        Ok(page)
    }

    /// Get a page by ID.
    pub async fn get(&self, page_id: i64) -> AppResult<page::Model> {
        self.page_repo.get_by_id(page_id).await
    }

    /// Set or clear the verified badge.
    pub async fn set_verified(&self, page_id: i64, verified: bool) -> AppResult<page::Model> {
        self.page_repo.set_verified(page_id, verified).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_page(page_id: i64, verified: bool) -> page::Model {
        page::Model {
            page_id,
            page_name: "Robotics Club".to_string(),
            page_type: "club".to_string(),
            description: None,
            verified,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_create_page_input_validation() {
        let empty_name = CreatePageInput {
            page_name: String::new(),
            page_type: "club".to_string(),
            description: None,
        };
        assert!(empty_name.validate().is_err());

        let long_type = CreatePageInput {
            page_name: "Robotics Club".to_string(),
            page_type: "x".repeat(51),
            description: None,
        };
        assert!(long_type.validate().is_err());
    }

    #[tokio::test]
    async fn test_create_page() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_page(1, false)]])
                .into_connection(),
        );
        let service = PageService::new(PageRepository::new(db));

        let page = service
            .create(CreatePageInput {
                page_name: "Robotics Club".to_string(),
                page_type: "club".to_string(),
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(page.page_id, 1);
        assert!(!page.verified);
    }

    #[tokio::test]
    async fn test_get_missing_page() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<page::Model>::new()])
                .into_connection(),
        );
        let service = PageService::new(PageRepository::new(db));

        assert!(matches!(service.get(3).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_verified() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_page(1, false)]])
                .append_query_results([[create_test_page(1, true)]])
                .into_connection(),
        );
        let service = PageService::new(PageRepository::new(db));

        let page = service.set_verified(1, true).await.unwrap();
        assert!(page.verified);
    }
}

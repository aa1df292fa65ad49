//! Page repository.

use std::sync::Arc;

use crate::entities::{Page, page};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

/// Page repository for database operations.
#[derive(Clone)]
pub struct PageRepository {
    db: Arc<DatabaseConnection>,
}

impl PageRepository {
    /// Create a new page repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a page by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<page::Model>> {
        Page::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find a page by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<page::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page {id}")))
    }

    /// Create a new page.
    pub async fn create(&self, model: page::ActiveModel) -> AppResult<page::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Set or clear the verified badge.
    pub async fn set_verified(&self, id: i64, verified: bool) -> AppResult<page::Model> {
        let mut active = self.get_by_id(id).await?.into_active_model();
        active.verified = Set(verified);
        active.update(self.db.as_ref()).await.map_err(map_db_err)
    }
}

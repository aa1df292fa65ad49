//! Event repository (events and reminders).

use std::sync::Arc;

use crate::entities::{Event, EventReminder, event, event_reminder};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait, prelude::DateTimeWithTimeZone,
};

/// Event repository for database operations.
#[derive(Clone)]
pub struct EventRepository {
    db: Arc<DatabaseConnection>,
}

impl EventRepository {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<event::Model>> {
        Event::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find an event by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<event::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {id}")))
    }

    /// Create a new event.
    pub async fn create(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Create a reminder for an account at a resolved time.
    pub async fn create_reminder(
        &self,
        event_id: i64,
        user_id: i64,
        reminder_time: DateTimeWithTimeZone,
    ) -> AppResult<event_reminder::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = EventReminder::find()
            .filter(event_reminder::Column::EventId.eq(event_id))
            .filter(event_reminder::Column::UserId.eq(user_id))
            .filter(event_reminder::Column::ReminderTime.eq(reminder_time))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "A reminder for this event at this time already exists.".to_string(),
            ));
        }

        let reminder = event_reminder::ActiveModel {
            event_id: Set(event_id),
            user_id: Set(user_id),
            reminder_time: Set(Some(reminder_time)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(reminder)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_reminder_duplicate() {
        let at: DateTimeWithTimeZone = (Utc::now() + Duration::days(1)).into();
        let existing = event_reminder::Model {
            reminder_id: 1,
            event_id: 3,
            user_id: 4,
            reminder_time: Some(at),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let repo = EventRepository::new(db);
        let result = repo.create_reminder(3, 4, at).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<event::Model>::new()])
                .into_connection(),
        );

        let repo = EventRepository::new(db);
        assert!(matches!(repo.get_by_id(9).await, Err(AppError::NotFound(_))));
    }
}

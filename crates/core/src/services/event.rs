//! Event service.

use campus_common::{AppError, AppResult};
use campus_db::entities::{event, event_reminder};
use campus_db::repositories::{AccountRepository, EventRepository, PageRepository};
use chrono::Duration;
use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

/// Reminder time used when none is given: one hour before the event starts.
#[must_use]
pub fn default_reminder_time(start_date: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    start_date - Duration::hours(1)
}

/// Input for creating an event.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventInput {
    pub page_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: Option<DateTimeWithTimeZone>,
    #[validate(length(max = 255))]
    pub location: String,
}

/// Event service.
#[derive(Clone)]
pub struct EventService {
    event_repo: EventRepository,
    account_repo: AccountRepository,
    page_repo: PageRepository,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub const fn new(
        event_repo: EventRepository,
        account_repo: AccountRepository,
        page_repo: PageRepository,
    ) -> Self {
        Self {
            event_repo,
            account_repo,
            page_repo,
        }
    }

    /// Create an event hosted by a page.
    pub async fn create_event(&self, input: CreateEventInput) -> AppResult<event::Model> {
        input.validate()?;
        if input.end_date.is_some_and(|end| end < input.start_date) {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }
        self.page_repo.get_by_id(input.page_id).await?;

        let model = event::ActiveModel {
            page_id: Set(input.page_id),
            title: Set(input.title),
            description: Set(input.description),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            location: Set(input.location),
            ..Default::default()
        };

        let event = self.event_repo.create(model).await?;
        debug!(event_id = event.event_id, page_id = event.page_id, "Event created");
        Ok(event)
    }

    /// Remind an account of an event.
    ///
    /// Without an explicit time the reminder is set one hour before the
    /// event starts.
    pub async fn create_reminder(
        &self,
        event_id: i64,
        user_id: i64,
        reminder_time: Option<DateTimeWithTimeZone>,
    ) -> AppResult<event_reminder::Model> {
        let event = self.event_repo.get_by_id(event_id).await?;
        self.account_repo.get_by_id(user_id).await?;

        let reminder_time =
            reminder_time.unwrap_or_else(|| default_reminder_time(event.start_date));

        self.event_repo
            .create_reminder(event_id, user_id, reminder_time)
            .await
    }
}

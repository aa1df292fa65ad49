//! Database layer for campus-rs.

pub mod actor;
pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod test_utils;

pub use actor::Actor;

use campus_common::{AppError, Config};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::log::LevelFilter;

/// Initialize database connection.
pub async fn init(config: &Config) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.database.url);

    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Messages for named storage constraints.
const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    ("uniq_post_reaction_", "Duplicate reaction: this actor already reacted to this post."),
    ("uniq_comment_reaction_", "Duplicate reaction: this actor already reacted to this comment."),
    ("uniq_conversation_", "Duplicate member: this actor is already in this conversation."),
    (
        "uniq_msg_reaction_",
        "Duplicate reaction: this actor already used this reaction type on this message.",
    ),
    ("uniq_post_media_order", "A media item with this order_index already exists on this post."),
    (
        "uniq_message_media_order",
        "A media item with this order_index already exists on this message.",
    ),
    ("uniq_friendship_pair", "A friendship between these users already exists."),
    ("uniq_community_user", "This user is already a member of this community."),
    ("uniq_user_page_follow", "This user already follows this page."),
    ("uniq_event_user_time", "A reminder for this event at this time already exists."),
    ("account_username_key", "username already exists"),
    ("chk_post_author", "Exactly one of 'author_user' or 'author_page' must be set."),
    ("chk_comment_author", "Exactly one of 'author_user' or 'author_page' must be set."),
    ("chk_message_sender", "Exactly one of 'sender_user' or 'sender_page' must be set."),
    ("_author", "Exactly one of 'user' or 'page' must be set."),
    ("_order_index", "order_index must be non-negative."),
];

/// Classify a storage error.
///
/// Unique, foreign-key and check constraint violations are rejected writes
/// and become [`AppError::Validation`]; anything else is a server error.
#[must_use]
pub fn map_db_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            AppError::Validation(constraint_message(&msg).unwrap_or(msg))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            tracing::debug!(error = %msg, "Foreign key violation");
            AppError::Validation("Referenced row does not exist.".to_string())
        }
        _ => {
            let msg = err.to_string();
            if msg.contains("violates check constraint") {
                AppError::Validation(constraint_message(&msg).unwrap_or(msg))
            } else {
                AppError::Database(msg)
            }
        }
    }
}

fn constraint_message(raw: &str) -> Option<String> {
    CONSTRAINT_MESSAGES
        .iter()
        .find(|(name, _)| raw.contains(name))
        .map(|(_, message)| (*message).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_message_for_reaction_indexes() {
        assert_eq!(
            constraint_message(
                "duplicate key value violates unique constraint \"uniq_post_reaction_page\""
            )
            .as_deref(),
            Some("Duplicate reaction: this actor already reacted to this post.")
        );
        assert_eq!(
            constraint_message("violates unique constraint \"uniq_msg_reaction_user_type\"")
                .as_deref(),
            Some("Duplicate reaction: this actor already used this reaction type on this message.")
        );
    }

    #[test]
    fn test_constraint_message_prefers_specific_check() {
        assert_eq!(
            constraint_message("violates check constraint \"chk_message_sender\"").as_deref(),
            Some("Exactly one of 'sender_user' or 'sender_page' must be set.")
        );
        assert_eq!(
            constraint_message("violates check constraint \"chk_conversation_member_author\"")
                .as_deref(),
            Some("Exactly one of 'user' or 'page' must be set.")
        );
    }

    #[test]
    fn test_unknown_error_is_database_error() {
        let err = map_db_err(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_check_violation_is_validation_error() {
        let err = map_db_err(DbErr::Custom(
            "new row for relation \"post\" violates check constraint \"chk_post_author\""
                .to_string(),
        ));
        assert!(matches!(err, AppError::Validation(_)));
    }
}

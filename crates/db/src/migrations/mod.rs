//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_account_table;
mod m20250101_000002_create_identity_tables;
mod m20250101_000003_create_social_graph_tables;
mod m20250101_000004_create_content_tables;
mod m20250101_000005_create_messaging_tables;
mod m20250101_000006_create_event_notification_tables;
mod m20250101_000007_create_report_table;
mod m20250101_000008_create_token_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_account_table::Migration),
            Box::new(m20250101_000002_create_identity_tables::Migration),
            Box::new(m20250101_000003_create_social_graph_tables::Migration),
            Box::new(m20250101_000004_create_content_tables::Migration),
            Box::new(m20250101_000005_create_messaging_tables::Migration),
            Box::new(m20250101_000006_create_event_notification_tables::Migration),
            Box::new(m20250101_000007_create_report_table::Migration),
            Box::new(m20250101_000008_create_token_tables::Migration),
        ]
    }
}

/// Require exactly one of two nullable columns to be set.
async fn add_exactly_one_check(
    manager: &SchemaManager<'_>,
    table: &str,
    constraint: &str,
    first: &str,
    second: &str,
) -> Result<(), DbErr> {
    manager
        .get_connection()
        .execute_unprepared(&format!(
            r#"
            ALTER TABLE "{table}" ADD CONSTRAINT "{constraint}" CHECK (
                ("{first}" IS NOT NULL AND "{second}" IS NULL)
                OR ("{first}" IS NULL AND "{second}" IS NOT NULL)
            );
            "#
        ))
        .await?;
    Ok(())
}

async fn add_non_negative_check(
    manager: &SchemaManager<'_>,
    table: &str,
    constraint: &str,
    column: &str,
) -> Result<(), DbErr> {
    manager
        .get_connection()
        .execute_unprepared(&format!(
            r#"ALTER TABLE "{table}" ADD CONSTRAINT "{constraint}" CHECK ("{column}" >= 0);"#
        ))
        .await?;
    Ok(())
}

/// Unique index over `columns`, applied only to rows where `present` is set.
async fn create_partial_unique_index(
    manager: &SchemaManager<'_>,
    name: &str,
    table: &str,
    columns: &[&str],
    present: &str,
) -> Result<(), DbErr> {
    let columns = columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    manager
        .get_connection()
        .execute_unprepared(&format!(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS "{name}"
            ON "{table}" ({columns})
            WHERE "{present}" IS NOT NULL;
            "#
        ))
        .await?;
    Ok(())
}

//! Create `report` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::ReportId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Report::ReporterUserId).big_integer())
                    .col(ColumnDef::new(Report::ReporterPageId).big_integer())
                    .col(
                        ColumnDef::new(Report::ReportedContentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Report::ContentType).string_len(50).not_null())
                    .col(ColumnDef::new(Report::Reason).text().not_null())
                    .col(ColumnDef::new(Report::FinalAction).string_len(50).not_null())
                    .col(ColumnDef::new(Report::UniversityPageId).big_integer())
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_reporter_user")
                            .from(Report::Table, Report::ReporterUserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_reporter_page")
                            .from(Report::Table, Report::ReporterPageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_university_page")
                            .from(Report::Table, Report::UniversityPageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: university_page_id (moderation queue per university)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_university_page_id")
                    .table(Report::Table)
                    .col(Report::UniversityPageId)
                    .to_owned(),
            )
            .await?;

        // Index: (content_type, reported_content_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_target")
                    .table(Report::Table)
                    .col(Report::ContentType)
                    .col(Report::ReportedContentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    Table,
    ReportId,
    ReporterUserId,
    ReporterPageId,
    ReportedContentId,
    ContentType,
    Reason,
    FinalAction,
    UniversityPageId,
    CreatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

#[derive(Iden)]
enum Page {
    Table,
    PageId,
}

//! Create `event`, `event_reminder` and `notification` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create event table
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::EventId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::PageId).big_integer().not_null())
                    .col(ColumnDef::new(Event::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Event::Description).text())
                    .col(
                        ColumnDef::new(Event::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Event::EndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Event::Location)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_page")
                            .from(Event::Table, Event::PageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (page_id, start_date) for upcoming events of a page
        manager
            .create_index(
                Index::create()
                    .name("idx_event_page_start_date")
                    .table(Event::Table)
                    .col(Event::PageId)
                    .col(Event::StartDate)
                    .to_owned(),
            )
            .await?;

        // Create event_reminder table
        manager
            .create_table(
                Table::create()
                    .table(EventReminder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventReminder::ReminderId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventReminder::EventId).big_integer().not_null())
                    .col(ColumnDef::new(EventReminder::UserId).big_integer().not_null())
                    .col(ColumnDef::new(EventReminder::ReminderTime).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_reminder_event")
                            .from(EventReminder::Table, EventReminder::EventId)
                            .to(Event::Table, Event::EventId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_reminder_user")
                            .from(EventReminder::Table, EventReminder::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (event_id, user_id, reminder_time)
        manager
            .create_index(
                Index::create()
                    .name("uniq_event_user_time")
                    .table(EventReminder::Table)
                    .col(EventReminder::EventId)
                    .col(EventReminder::UserId)
                    .col(EventReminder::ReminderTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create notification table
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notification::NotificationId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notification::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Notification::Type).string_len(30).not_null())
                    .col(ColumnDef::new(Notification::Content).text().not_null())
                    .col(
                        ColumnDef::new(Notification::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notification::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_user")
                            .from(Notification::Table, Notification::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, is_read) for unread listings
        manager
            .create_index(
                Index::create()
                    .name("idx_notification_user_is_read")
                    .table(Notification::Table)
                    .col(Notification::UserId)
                    .col(Notification::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventReminder::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Event {
    Table,
    EventId,
    PageId,
    Title,
    Description,
    StartDate,
    EndDate,
    Location,
}

#[derive(Iden)]
enum EventReminder {
    Table,
    ReminderId,
    EventId,
    UserId,
    ReminderTime,
}

#[derive(Iden)]
enum Notification {
    Table,
    NotificationId,
    UserId,
    Type,
    Content,
    IsRead,
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

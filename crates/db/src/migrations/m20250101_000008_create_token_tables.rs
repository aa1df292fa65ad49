//! Create `outstanding_token` and `blacklisted_token` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create outstanding_token table
        manager
            .create_table(
                Table::create()
                    .table(OutstandingToken::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OutstandingToken::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OutstandingToken::Jti)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(OutstandingToken::UserId).big_integer())
                    .col(ColumnDef::new(OutstandingToken::Token).text().not_null())
                    .col(
                        ColumnDef::new(OutstandingToken::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(OutstandingToken::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outstanding_token_user")
                            .from(OutstandingToken::Table, OutstandingToken::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_outstanding_token_user_id")
                    .table(OutstandingToken::Table)
                    .col(OutstandingToken::UserId)
                    .to_owned(),
            )
            .await?;

        // Create blacklisted_token table
        manager
            .create_table(
                Table::create()
                    .table(BlacklistedToken::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlacklistedToken::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlacklistedToken::TokenId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(BlacklistedToken::BlacklistedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blacklisted_token_token")
                            .from(BlacklistedToken::Table, BlacklistedToken::TokenId)
                            .to(OutstandingToken::Table, OutstandingToken::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlacklistedToken::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OutstandingToken::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OutstandingToken {
    Table,
    Id,
    Jti,
    UserId,
    Token,
    CreatedAt,
    ExpiresAt,
}

#[derive(Iden)]
enum BlacklistedToken {
    Table,
    Id,
    TokenId,
    BlacklistedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

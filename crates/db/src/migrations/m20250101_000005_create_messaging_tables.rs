//! Create `conversation`, `conversation_member`, `message`, `message_media`
//! and `message_reaction` tables.

use sea_orm_migration::prelude::*;

use super::{add_exactly_one_check, add_non_negative_check, create_partial_unique_index};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create conversation table
        manager
            .create_table(
                Table::create()
                    .table(Conversation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Conversation::ConversationId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Conversation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Conversation::IsGroup)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Create conversation_member table
        manager
            .create_table(
                Table::create()
                    .table(ConversationMember::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConversationMember::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ConversationMember::ConversationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConversationMember::UserId).big_integer())
                    .col(ColumnDef::new(ConversationMember::PageId).big_integer())
                    .col(
                        ColumnDef::new(ConversationMember::Role)
                            .string_len(50)
                            .not_null()
                            .default("member"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversation_member_conversation")
                            .from(ConversationMember::Table, ConversationMember::ConversationId)
                            .to(Conversation::Table, Conversation::ConversationId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversation_member_user")
                            .from(ConversationMember::Table, ConversationMember::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversation_member_page")
                            .from(ConversationMember::Table, ConversationMember::PageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        add_exactly_one_check(
            manager,
            "conversation_member",
            "chk_conversation_member_author",
            "user_id",
            "page_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_conversation_user",
            "conversation_member",
            &["conversation_id", "user_id"],
            "user_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_conversation_page",
            "conversation_member",
            &["conversation_id", "page_id"],
            "page_id",
        )
        .await?;

        // Create message table
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Message::MessageId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Message::ConversationId).big_integer().not_null())
                    .col(ColumnDef::new(Message::Content).text())
                    .col(ColumnDef::new(Message::SenderUserId).big_integer())
                    .col(ColumnDef::new(Message::SenderPageId).big_integer())
                    .col(
                        ColumnDef::new(Message::SentAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_conversation")
                            .from(Message::Table, Message::ConversationId)
                            .to(Conversation::Table, Conversation::ConversationId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_sender_user")
                            .from(Message::Table, Message::SenderUserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_sender_page")
                            .from(Message::Table, Message::SenderPageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        add_exactly_one_check(
            manager,
            "message",
            "chk_message_sender",
            "sender_user_id",
            "sender_page_id",
        )
        .await?;

        // Index: (conversation_id, sent_at) for history paging
        manager
            .create_index(
                Index::create()
                    .name("idx_message_conversation_sent_at")
                    .table(Message::Table)
                    .col(Message::ConversationId)
                    .col(Message::SentAt)
                    .to_owned(),
            )
            .await?;

        // Create message_media table
        manager
            .create_table(
                Table::create()
                    .table(MessageMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessageMedia::MediaId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MessageMedia::MessageId).big_integer().not_null())
                    .col(ColumnDef::new(MessageMedia::MediaType).string_len(10).not_null())
                    .col(ColumnDef::new(MessageMedia::MediaUrl).string_len(200).not_null())
                    .col(
                        ColumnDef::new(MessageMedia::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_media_message")
                            .from(MessageMedia::Table, MessageMedia::MessageId)
                            .to(Message::Table, Message::MessageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        add_non_negative_check(
            manager,
            "message_media",
            "chk_message_media_order_index",
            "order_index",
        )
        .await?;

        // Unique index: (message_id, order_index)
        manager
            .create_index(
                Index::create()
                    .name("uniq_message_media_order")
                    .table(MessageMedia::Table)
                    .col(MessageMedia::MessageId)
                    .col(MessageMedia::OrderIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create message_reaction table
        manager
            .create_table(
                Table::create()
                    .table(MessageReaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessageReaction::MessageReactionId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MessageReaction::MessageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MessageReaction::UserId).big_integer())
                    .col(ColumnDef::new(MessageReaction::PageId).big_integer())
                    .col(
                        ColumnDef::new(MessageReaction::MessageReactionType)
                            .string_len(50)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_reaction_message")
                            .from(MessageReaction::Table, MessageReaction::MessageId)
                            .to(Message::Table, Message::MessageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_reaction_user")
                            .from(MessageReaction::Table, MessageReaction::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_reaction_page")
                            .from(MessageReaction::Table, MessageReaction::PageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        add_exactly_one_check(
            manager,
            "message_reaction",
            "chk_message_reaction_author",
            "user_id",
            "page_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_msg_reaction_user_type",
            "message_reaction",
            &["message_id", "user_id", "message_reaction_type"],
            "user_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_msg_reaction_page_type",
            "message_reaction",
            &["message_id", "page_id", "message_reaction_type"],
            "page_id",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MessageReaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MessageMedia::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ConversationMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Conversation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Conversation {
    Table,
    ConversationId,
    CreatedAt,
    IsGroup,
}

#[derive(Iden)]
enum ConversationMember {
    Table,
    Id,
    ConversationId,
    UserId,
    PageId,
    Role,
}

#[derive(Iden)]
enum Message {
    Table,
    MessageId,
    ConversationId,
    Content,
    SenderUserId,
    SenderPageId,
    SentAt,
}

#[derive(Iden)]
enum MessageMedia {
    Table,
    MediaId,
    MessageId,
    MediaType,
    MediaUrl,
    OrderIndex,
}

#[derive(Iden)]
enum MessageReaction {
    Table,
    MessageReactionId,
    MessageId,
    UserId,
    PageId,
    MessageReactionType,
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

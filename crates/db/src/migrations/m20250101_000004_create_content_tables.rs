//! Create `post`, `post_media`, `comment`, `post_reaction` and `comment_reaction` tables.

use sea_orm_migration::prelude::*;

use super::{add_exactly_one_check, add_non_negative_check, create_partial_unique_index};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create post table
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::PostId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::ContentText).text())
                    .col(
                        ColumnDef::new(Post::PostType)
                            .string_len(20)
                            .not_null()
                            .default("normal"),
                    )
                    .col(
                        ColumnDef::new(Post::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Post::AuthorUserId).big_integer())
                    .col(ColumnDef::new(Post::AuthorPageId).big_integer())
                    .col(ColumnDef::new(Post::CommunityId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_author_user")
                            .from(Post::Table, Post::AuthorUserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_author_page")
                            .from(Post::Table, Post::AuthorPageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_community")
                            .from(Post::Table, Post::CommunityId)
                            .to(Community::Table, Community::CommunityId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        add_exactly_one_check(manager, "post", "chk_post_author", "author_user_id", "author_page_id")
            .await?;

        // Index: created_at (for feeds)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_created_at")
                    .table(Post::Table)
                    .col(Post::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: community_id
        manager
            .create_index(
                Index::create()
                    .name("idx_post_community_id")
                    .table(Post::Table)
                    .col(Post::CommunityId)
                    .to_owned(),
            )
            .await?;

        // Create post_media table
        manager
            .create_table(
                Table::create()
                    .table(PostMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostMedia::MediaId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostMedia::PostId).big_integer().not_null())
                    .col(ColumnDef::new(PostMedia::MediaType).string_len(10).not_null())
                    .col(ColumnDef::new(PostMedia::MediaUrl).string_len(200).not_null())
                    .col(
                        ColumnDef::new(PostMedia::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_media_post")
                            .from(PostMedia::Table, PostMedia::PostId)
                            .to(Post::Table, Post::PostId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        add_non_negative_check(manager, "post_media", "chk_post_media_order_index", "order_index")
            .await?;

        // Unique index: (post_id, order_index)
        manager
            .create_index(
                Index::create()
                    .name("uniq_post_media_order")
                    .table(PostMedia::Table)
                    .col(PostMedia::PostId)
                    .col(PostMedia::OrderIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create comment table
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comment::CommentId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comment::PostId).big_integer().not_null())
                    .col(ColumnDef::new(Comment::Content).text().not_null())
                    .col(
                        ColumnDef::new(Comment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Comment::AuthorUserId).big_integer())
                    .col(ColumnDef::new(Comment::AuthorPageId).big_integer())
                    .col(ColumnDef::new(Comment::ParentCommentId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_post")
                            .from(Comment::Table, Comment::PostId)
                            .to(Post::Table, Post::PostId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_author_user")
                            .from(Comment::Table, Comment::AuthorUserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_author_page")
                            .from(Comment::Table, Comment::AuthorPageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_parent")
                            .from(Comment::Table, Comment::ParentCommentId)
                            .to(Comment::Table, Comment::CommentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        add_exactly_one_check(
            manager,
            "comment",
            "chk_comment_author",
            "author_user_id",
            "author_page_id",
        )
        .await?;

        // Index: post_id (for listing comments on a post)
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_post_id")
                    .table(Comment::Table)
                    .col(Comment::PostId)
                    .to_owned(),
            )
            .await?;

        // Index: parent_comment_id (for listing replies)
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_parent_comment_id")
                    .table(Comment::Table)
                    .col(Comment::ParentCommentId)
                    .to_owned(),
            )
            .await?;

        // Create post_reaction table
        manager
            .create_table(
                Table::create()
                    .table(PostReaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostReaction::PostReactionId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostReaction::PostId).big_integer().not_null())
                    .col(ColumnDef::new(PostReaction::UserId).big_integer())
                    .col(ColumnDef::new(PostReaction::PageId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_reaction_post")
                            .from(PostReaction::Table, PostReaction::PostId)
                            .to(Post::Table, Post::PostId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_reaction_user")
                            .from(PostReaction::Table, PostReaction::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_reaction_page")
                            .from(PostReaction::Table, PostReaction::PageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        add_exactly_one_check(
            manager,
            "post_reaction",
            "chk_post_reaction_author",
            "user_id",
            "page_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_post_reaction_user",
            "post_reaction",
            &["post_id", "user_id"],
            "user_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_post_reaction_page",
            "post_reaction",
            &["post_id", "page_id"],
            "page_id",
        )
        .await?;

        // Create comment_reaction table
        manager
            .create_table(
                Table::create()
                    .table(CommentReaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommentReaction::CommentReactionId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommentReaction::CommentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommentReaction::UserId).big_integer())
                    .col(ColumnDef::new(CommentReaction::PageId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_reaction_comment")
                            .from(CommentReaction::Table, CommentReaction::CommentId)
                            .to(Comment::Table, Comment::CommentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_reaction_user")
                            .from(CommentReaction::Table, CommentReaction::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_reaction_page")
                            .from(CommentReaction::Table, CommentReaction::PageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        add_exactly_one_check(
            manager,
            "comment_reaction",
            "chk_comment_reaction_author",
            "user_id",
            "page_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_comment_reaction_user",
            "comment_reaction",
            &["comment_id", "user_id"],
            "user_id",
        )
        .await?;
        create_partial_unique_index(
            manager,
            "uniq_comment_reaction_page",
            "comment_reaction",
            &["comment_id", "page_id"],
            "page_id",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommentReaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostReaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostMedia::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Post {
    Table,
    PostId,
    ContentText,
    PostType,
    CreatedAt,
    AuthorUserId,
    AuthorPageId,
    CommunityId,
}

#[derive(Iden)]
enum PostMedia {
    Table,
    MediaId,
    PostId,
    MediaType,
    MediaUrl,
    OrderIndex,
}

#[derive(Iden)]
enum Comment {
    Table,
    CommentId,
    PostId,
    Content,
    CreatedAt,
    AuthorUserId,
    AuthorPageId,
    ParentCommentId,
}

#[derive(Iden)]
enum PostReaction {
    Table,
    PostReactionId,
    PostId,
    UserId,
    PageId,
}

#[derive(Iden)]
enum CommentReaction {
    Table,
    CommentReactionId,
    CommentId,
    UserId,
    PageId,
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

#[derive(Iden)]
enum Community {
    Table,
    CommunityId,
}

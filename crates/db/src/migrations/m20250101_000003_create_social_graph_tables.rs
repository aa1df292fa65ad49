//! Create `friendship`, `community`, `community_member` and `follow_page` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create friendship table
        manager
            .create_table(
                Table::create()
                    .table(Friendship::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Friendship::FriendshipId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Friendship::User1Id).big_integer().not_null())
                    .col(ColumnDef::new(Friendship::User2Id).big_integer().not_null())
                    .col(
                        ColumnDef::new(Friendship::Status)
                            .string_len(10)
                            .not_null()
                            .default("pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_user1")
                            .from(Friendship::Table, Friendship::User1Id)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_user2")
                            .from(Friendship::Table, Friendship::User2Id)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user1_id, user2_id) - ordered pair, not normalized
        manager
            .create_index(
                Index::create()
                    .name("uniq_friendship_pair")
                    .table(Friendship::Table)
                    .col(Friendship::User1Id)
                    .col(Friendship::User2Id)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: user2_id (for incoming requests)
        manager
            .create_index(
                Index::create()
                    .name("idx_friendship_user2_id")
                    .table(Friendship::Table)
                    .col(Friendship::User2Id)
                    .to_owned(),
            )
            .await?;

        // Create community table
        manager
            .create_table(
                Table::create()
                    .table(Community::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Community::CommunityId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Community::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Community::Description).text())
                    .col(
                        ColumnDef::new(Community::Privacy)
                            .string_len(10)
                            .not_null()
                            .default("public"),
                    )
                    .col(
                        ColumnDef::new(Community::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create community_member table
        manager
            .create_table(
                Table::create()
                    .table(CommunityMember::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityMember::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityMember::CommunityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityMember::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CommunityMember::Role)
                            .string_len(50)
                            .not_null()
                            .default("member"),
                    )
                    .col(
                        ColumnDef::new(CommunityMember::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_member_community")
                            .from(CommunityMember::Table, CommunityMember::CommunityId)
                            .to(Community::Table, Community::CommunityId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_member_user")
                            .from(CommunityMember::Table, CommunityMember::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (community_id, user_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_community_user")
                    .table(CommunityMember::Table)
                    .col(CommunityMember::CommunityId)
                    .col(CommunityMember::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's communities)
        manager
            .create_index(
                Index::create()
                    .name("idx_community_member_user_id")
                    .table(CommunityMember::Table)
                    .col(CommunityMember::UserId)
                    .to_owned(),
            )
            .await?;

        // Create follow_page table
        manager
            .create_table(
                Table::create()
                    .table(FollowPage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FollowPage::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FollowPage::UserId).big_integer().not_null())
                    .col(ColumnDef::new(FollowPage::PageId).big_integer().not_null())
                    .col(
                        ColumnDef::new(FollowPage::FollowedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follow_page_user")
                            .from(FollowPage::Table, FollowPage::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follow_page_page")
                            .from(FollowPage::Table, FollowPage::PageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, page_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_page_follow")
                    .table(FollowPage::Table)
                    .col(FollowPage::UserId)
                    .col(FollowPage::PageId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: page_id (for listing followers)
        manager
            .create_index(
                Index::create()
                    .name("idx_follow_page_page_id")
                    .table(FollowPage::Table)
                    .col(FollowPage::PageId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FollowPage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Community::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Friendship::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Friendship {
    Table,
    FriendshipId,
    #[iden = "user1_id"]
    User1Id,
    #[iden = "user2_id"]
    User2Id,
    Status,
}

#[derive(Iden)]
enum Community {
    Table,
    CommunityId,
    Name,
    Description,
    Privacy,
    CreatedAt,
}

#[derive(Iden)]
enum CommunityMember {
    Table,
    Id,
    CommunityId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(Iden)]
enum FollowPage {
    Table,
    Id,
    UserId,
    PageId,
    FollowedAt,
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

//! Create `user_profile`, `page`, `admin`, `instructor` and `student` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user_profile table
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfile::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::FullName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(UserProfile::ProfileImage).string_len(200))
                    .col(ColumnDef::new(UserProfile::BannerImage).string_len(200))
                    .col(ColumnDef::new(UserProfile::Bio).text())
                    .col(
                        ColumnDef::new(UserProfile::Status)
                            .string_len(12)
                            .not_null()
                            .default("online"),
                    )
                    .col(
                        ColumnDef::new(UserProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profile_user")
                            .from(UserProfile::Table, UserProfile::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create page table
        manager
            .create_table(
                Table::create()
                    .table(Page::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Page::PageId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Page::PageName).string_len(255).not_null())
                    .col(ColumnDef::new(Page::PageType).string_len(50).not_null())
                    .col(ColumnDef::new(Page::Description).text())
                    .col(ColumnDef::new(Page::Verified).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Page::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create admin table
        manager
            .create_table(
                Table::create()
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admin::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_user")
                            .from(Admin::Table, Admin::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create instructor table
        manager
            .create_table(
                Table::create()
                    .table(Instructor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructor::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructor::AcademicTitle).string_len(20))
                    .col(
                        ColumnDef::new(Instructor::Department)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Instructor::InstructorType).string_len(10))
                    .col(ColumnDef::new(Instructor::UniversityPageId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructor_user")
                            .from(Instructor::Table, Instructor::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructor_university_page")
                            .from(Instructor::Table, Instructor::UniversityPageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create student table
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Student::UniversityPageId).big_integer())
                    .col(
                        ColumnDef::new(Student::Major)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Student::AcademicLevel).string_len(20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_user")
                            .from(Student::Table, Student::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_university_page")
                            .from(Student::Table, Student::UniversityPageId)
                            .to(Page::Table, Page::PageId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Instructor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admin::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Page::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserProfile {
    Table,
    Id,
    UserId,
    FullName,
    ProfileImage,
    BannerImage,
    Bio,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Page {
    Table,
    PageId,
    PageName,
    PageType,
    Description,
    Verified,
    CreatedAt,
}

#[derive(Iden)]
enum Admin {
    Table,
    UserId,
}

#[derive(Iden)]
enum Instructor {
    Table,
    UserId,
    AcademicTitle,
    Department,
    InstructorType,
    UniversityPageId,
}

#[derive(Iden)]
enum Student {
    Table,
    UserId,
    UniversityPageId,
    Major,
    AcademicLevel,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

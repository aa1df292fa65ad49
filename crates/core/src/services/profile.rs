//! Profile and role service.

use campus_common::AppResult;
use campus_db::entities::{admin, instructor, student, user_profile};
use campus_db::repositories::{AccountRepository, PageRepository, ProfileRepository};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

pub use campus_db::entities::instructor::{AcademicTitle, InstructorType};
pub use campus_db::entities::student::AcademicLevel;
pub use campus_db::entities::user_profile::ProfileStatus;

/// Input for creating a profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileInput {
    pub user_id: i64,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub full_name: String,
    #[validate(url, length(max = 200))]
    pub profile_image: Option<String>,
    #[validate(url, length(max = 200))]
    pub banner_image: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub status: ProfileStatus,
}

/// Input for making an account an instructor.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignInstructorInput {
    pub user_id: i64,
    pub academic_title: Option<AcademicTitle>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub department: String,
    pub instructor_type: Option<InstructorType>,
    pub university_page_id: Option<i64>,
}

/// Input for making an account a student.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignStudentInput {
    pub user_id: i64,
    pub university_page_id: Option<i64>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub major: String,
    pub academic_level: Option<AcademicLevel>,
}

/// Service for profiles and role assignment.
#[derive(Clone)]
pub struct ProfileService {
    profile_repo: ProfileRepository,
    account_repo: AccountRepository,
    page_repo: PageRepository,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(
        profile_repo: ProfileRepository,
        account_repo: AccountRepository,
        page_repo: PageRepository,
    ) -> Self {
        Self {
            profile_repo,
            account_repo,
            page_repo,
        }
    }

    /// Create the profile of an account.
    pub async fn create_profile(&self, input: CreateProfileInput) -> AppResult<user_profile::Model> {
        input.validate()?;
        self.account_repo.get_by_id(input.user_id).await?;

        let model = user_profile::ActiveModel {
            user_id: Set(input.user_id),
            full_name: Set(input.full_name),
            profile_image: Set(input.profile_image),
            banner_image: Set(input.banner_image),
            bio: Set(input.bio),
            status: Set(input.status),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.profile_repo.create(model).await
    }

    /// Change the presence status shown on a profile.
    pub async fn update_status(
        &self,
        user_id: i64,
        status: ProfileStatus,
    ) -> AppResult<user_profile::Model> {
        self.profile_repo.update_status(user_id, status).await
    }

    /// Grant the admin role.
    pub async fn assign_admin(&self, user_id: i64) -> AppResult<admin::Model> {
        self.account_repo.get_by_id(user_id).await?;
        let admin = self.profile_repo.assign_admin(user_id).await?;
        info!(user_id, "Admin role assigned");
        Ok(admin)
    }

    /// Grant or update the instructor role.
    pub async fn assign_instructor(
        &self,
        input: AssignInstructorInput,
    ) -> AppResult<instructor::Model> {
        input.validate()?;
        self.account_repo.get_by_id(input.user_id).await?;
        self.ensure_university_page(input.university_page_id).await?;

        self.profile_repo
            .upsert_instructor(instructor::Model {
                user_id: input.user_id,
                academic_title: input.academic_title,
                department: input.department,
                instructor_type: input.instructor_type,
                university_page_id: input.university_page_id,
            })
            .await
    }

    /// Grant or update the student role.
    pub async fn assign_student(&self, input: AssignStudentInput) -> AppResult<student::Model> {
        input.validate()?;
        self.account_repo.get_by_id(input.user_id).await?;
        self.ensure_university_page(input.university_page_id).await?;

        self.profile_repo
            .upsert_student(student::Model {
                user_id: input.user_id,
                university_page_id: input.university_page_id,
                major: input.major,
                academic_level: input.academic_level,
            })
            .await
    }

    async fn ensure_university_page(&self, page_id: Option<i64>) -> AppResult<()> {
        match page_id {
            Some(id) => self.page_repo.get_by_id(id).await.map(|_| ()),
            None => Ok(()),
        }
    }
}

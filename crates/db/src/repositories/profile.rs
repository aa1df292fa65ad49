//! Profile and role repository.

use std::sync::Arc;

use crate::entities::{
    Admin, Instructor, Student, UserProfile, admin, instructor, student, user_profile,
};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};

/// Repository for profiles and the admin/instructor/student role rows.
#[derive(Clone)]
pub struct ProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the profile of an account.
    pub async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<user_profile::Model>> {
        UserProfile::find()
            .filter(user_profile::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a profile. An account has at most one.
    pub async fn create(&self, model: user_profile::ActiveModel) -> AppResult<user_profile::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if let sea_orm::ActiveValue::Set(user_id) = model.user_id {
            let existing = UserProfile::find()
                .filter(user_profile::Column::UserId.eq(user_id))
                .one(&txn)
                .await
                .map_err(map_db_err)?;
            if existing.is_some() {
                return Err(AppError::Validation(
                    "A profile already exists for this account.".to_string(),
                ));
            }
        }

        let profile = model.insert(&txn).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(profile)
    }

    /// Set the presence status of an account's profile.
    pub async fn update_status(
        &self,
        user_id: i64,
        status: user_profile::ProfileStatus,
    ) -> AppResult<user_profile::Model> {
        let profile = self
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile for account {user_id}")))?;

        let mut active = profile.into_active_model();
        active.status = Set(status);
        active.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Find the admin marker of an account.
    pub async fn find_admin(&self, user_id: i64) -> AppResult<Option<admin::Model>> {
        Admin::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Mark an account as admin. Idempotent.
    pub async fn assign_admin(&self, user_id: i64) -> AppResult<admin::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = Admin::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        let model = match existing {
            Some(model) => model,
            None => admin::ActiveModel {
                user_id: Set(user_id),
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?,
        };

        txn.commit().await.map_err(map_db_err)?;
        Ok(model)
    }

    /// Find the instructor row of an account.
    pub async fn find_instructor(&self, user_id: i64) -> AppResult<Option<instructor::Model>> {
        Instructor::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Insert or replace the instructor row of an account.
    pub async fn upsert_instructor(&self, model: instructor::Model) -> AppResult<instructor::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let exists = Instructor::find_by_id(model.user_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_some();
        let active = instructor::ActiveModel {
            user_id: Set(model.user_id),
            academic_title: Set(model.academic_title),
            department: Set(model.department),
            instructor_type: Set(model.instructor_type),
            university_page_id: Set(model.university_page_id),
        };
        let saved = if exists {
            active.update(&txn).await
        } else {
            active.insert(&txn).await
        }
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(saved)
    }

    /// Find the student row of an account.
    pub async fn find_student(&self, user_id: i64) -> AppResult<Option<student::Model>> {
        Student::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Insert or replace the student row of an account.
    pub async fn upsert_student(&self, model: student::Model) -> AppResult<student::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let exists = Student::find_by_id(model.user_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_some();
        let active = student::ActiveModel {
            user_id: Set(model.user_id),
            university_page_id: Set(model.university_page_id),
            major: Set(model.major),
            academic_level: Set(model.academic_level),
        };
        let saved = if exists {
            active.update(&txn).await
        } else {
            active.insert(&txn).await
        }
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(saved)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_profile(user_id: i64) -> user_profile::Model {
        user_profile::Model {
            id: 1,
            user_id,
            full_name: "Alice Example".to_string(),
            profile_image: None,
            banner_image: None,
            bio: None,
            status: user_profile::ProfileStatus::Online,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_update_status() {
        let profile = create_test_profile(5);
        let mut updated = profile.clone();
        updated.status = user_profile::ProfileStatus::Dnd;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[profile]])
                .append_query_results([[updated]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo
            .update_status(5, user_profile::ProfileStatus::Dnd)
            .await
            .unwrap();

        assert_eq!(result.status, user_profile::ProfileStatus::Dnd);
    }

    #[tokio::test]
    async fn test_update_status_missing_profile() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user_profile::Model>::new()])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo
            .update_status(5, user_profile::ProfileStatus::Away)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_second_profile() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_profile(5)]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo
            .create(user_profile::ActiveModel {
                user_id: Set(5),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_assign_admin_is_idempotent() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[admin::Model { user_id: 9 }]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo.assign_admin(9).await.unwrap();

        assert_eq!(result.user_id, 9);
    }

    #[tokio::test]
    async fn test_upsert_student_inserts_when_absent() {
        let student = student::Model {
            user_id: 4,
            university_page_id: Some(2),
            major: "Computer Science".to_string(),
            academic_level: Some(student::AcademicLevel::Bachelor),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<student::Model>::new()])
                .append_query_results([[student.clone()]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo.upsert_student(student).await.unwrap();

        assert_eq!(result.major, "Computer Science");
        assert_eq!(result.academic_level, Some(student::AcademicLevel::Bachelor));
    }
}

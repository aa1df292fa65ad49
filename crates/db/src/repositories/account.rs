//! Account repository.

use std::sync::Arc;

use crate::entities::{Account, account, user_profile};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait, prelude::DateTimeWithTimeZone, sea_query::Expr,
};

/// Account repository for database operations.
#[derive(Clone)]
pub struct AccountRepository {
    db: Arc<DatabaseConnection>,
}

impl AccountRepository {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<account::Model>> {
        Account::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find an account by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<account::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {id}")))
    }

    /// Find an account by its exact username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create an account together with its default profile.
    ///
    /// Fails with a validation error if the username is taken. Both rows
    /// are written in one transaction.
    pub async fn create_with_profile(
        &self,
        model: account::ActiveModel,
    ) -> AppResult<(account::Model, user_profile::Model)> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if let ActiveValue::Set(username) = &model.username {
            let taken = Account::find()
                .filter(account::Column::Username.eq(username.as_str()))
                .one(&txn)
                .await
                .map_err(map_db_err)?;
            if taken.is_some() {
                return Err(AppError::Validation("username already exists".to_string()));
            }
        }

        let account = model.insert(&txn).await.map_err(map_db_err)?;

        let profile = user_profile::ActiveModel {
            user_id: Set(account.id),
            full_name: Set(String::new()),
            profile_image: Set(None),
            banner_image: Set(None),
            bio: Set(None),
            status: Set(user_profile::ProfileStatus::default()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok((account, profile))
    }

    /// Record a successful login.
    pub async fn touch_last_login(&self, id: i64) -> AppResult<()> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        Account::update_many()
            .col_expr(account::Column::LastLogin, Expr::value(now))
            .filter(account::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

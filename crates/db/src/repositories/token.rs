//! Refresh token ledger repository (outstanding and blacklisted tokens).

use std::sync::Arc;

use crate::entities::{BlacklistedToken, OutstandingToken, blacklisted_token, outstanding_token};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait, prelude::DateTimeWithTimeZone,
};

/// A refresh token to be recorded in the ledger.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Token ID claim.
    pub jti: String,
    /// Account the token was issued to.
    pub user_id: Option<i64>,
    /// The encoded token.
    pub token: String,
    /// Expiry claim.
    pub expires_at: DateTimeWithTimeZone,
}

/// Token repository for database operations.
#[derive(Clone)]
pub struct TokenRepository {
    db: Arc<DatabaseConnection>,
}

impl TokenRepository {
    /// Create a new token repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record an issued refresh token.
    pub async fn record_outstanding(
        &self,
        issued: IssuedToken,
    ) -> AppResult<outstanding_token::Model> {
        outstanding_active(issued)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find an issued token by its ID claim.
    pub async fn find_by_jti(&self, jti: &str) -> AppResult<Option<outstanding_token::Model>> {
        OutstandingToken::find()
            .filter(outstanding_token::Column::Jti.eq(jti))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Whether the token with this ID claim has been revoked.
    pub async fn is_blacklisted(&self, jti: &str) -> AppResult<bool> {
        let Some(outstanding) = self.find_by_jti(jti).await? else {
            return Ok(false);
        };

        let entry = BlacklistedToken::find()
            .filter(blacklisted_token::Column::TokenId.eq(outstanding.id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(entry.is_some())
    }

    /// Revoke a refresh token.
    ///
    /// Records the token first if it was never seen. Revoking an already
    /// revoked token is a validation error.
    pub async fn blacklist(&self, issued: IssuedToken) -> AppResult<blacklisted_token::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let outstanding = OutstandingToken::find()
            .filter(outstanding_token::Column::Jti.eq(issued.jti.as_str()))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        let outstanding = match outstanding {
            Some(model) => model,
            None => outstanding_active(issued)
                .insert(&txn)
                .await
                .map_err(map_db_err)?,
        };

        let existing = BlacklistedToken::find()
            .filter(blacklisted_token::Column::TokenId.eq(outstanding.id))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation("Token is blacklisted".to_string()));
        }

        let entry = blacklisted_token::ActiveModel {
            token_id: Set(outstanding.id),
            blacklisted_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(entry)
    }
}

fn outstanding_active(issued: IssuedToken) -> outstanding_token::ActiveModel {
    outstanding_token::ActiveModel {
        jti: Set(issued.jti),
        user_id: Set(issued.user_id),
        token: Set(issued.token),
        created_at: Set(Utc::now().into()),
        expires_at: Set(issued.expires_at),
        ..Default::default()
    }
}

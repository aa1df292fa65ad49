//! Community repository.

use std::sync::Arc;

use crate::entities::{Community, CommunityMember, community, community_member};
use crate::map_db_err;
use campus_common::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

/// Community repository for database operations.
#[derive(Clone)]
pub struct CommunityRepository {
    db: Arc<DatabaseConnection>,
}

impl CommunityRepository {
    /// Create a new community repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a community by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<community::Model>> {
        Community::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Create a community, optionally with its first member as owner.
    pub async fn create(
        &self,
        model: community::ActiveModel,
        owner_id: Option<i64>,
    ) -> AppResult<community::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let community = model.insert(&txn).await.map_err(map_db_err)?;
        if let Some(user_id) = owner_id {
            community_member::ActiveModel {
                community_id: Set(community.community_id),
                user_id: Set(user_id),
                role: Set(community_member::MemberRole::Owner),
                joined_at: Set(Utc::now().into()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(community)
    }

    /// Find the membership of an account in a community.
    pub async fn find_member(
        &self,
        community_id: i64,
        user_id: i64,
    ) -> AppResult<Option<community_member::Model>> {
        CommunityMember::find()
            .filter(community_member::Column::CommunityId.eq(community_id))
            .filter(community_member::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Add an account to a community.
    pub async fn add_member(
        &self,
        community_id: i64,
        user_id: i64,
        role: community_member::MemberRole,
    ) -> AppResult<community_member::Model> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = CommunityMember::find()
            .filter(community_member::Column::CommunityId.eq(community_id))
            .filter(community_member::Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Err(AppError::Validation(
                "This user is already a member of this community.".to_string(),
            ));
        }

        let member = community_member::ActiveModel {
            community_id: Set(community_id),
            user_id: Set(user_id),
            role: Set(role),
            joined_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(member)
    }
}

//! Social graph service: friendships, communities and page follows.

use campus_common::{AppError, AppResult};
use campus_db::entities::{community, community_member, follow_page, friendship};
use campus_db::repositories::{
    AccountRepository, CommunityRepository, FollowPageRepository, FriendshipRepository,
    PageRepository,
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

pub use campus_db::entities::community::CommunityPrivacy;
pub use campus_db::entities::community_member::MemberRole;
pub use campus_db::entities::friendship::FriendshipStatus;

/// Input for creating a community.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommunityInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub privacy: CommunityPrivacy,
    /// Account recorded as the community owner.
    pub owner_id: Option<i64>,
}

/// Social graph service.
#[derive(Clone)]
pub struct SocialService {
    friendship_repo: FriendshipRepository,
    community_repo: CommunityRepository,
    follow_repo: FollowPageRepository,
    account_repo: AccountRepository,
    page_repo: PageRepository,
}

impl SocialService {
    /// Create a new social service.
    #[must_use]
    pub const fn new(
        friendship_repo: FriendshipRepository,
        community_repo: CommunityRepository,
        follow_repo: FollowPageRepository,
        account_repo: AccountRepository,
        page_repo: PageRepository,
    ) -> Self {
        Self {
            friendship_repo,
            community_repo,
            follow_repo,
            account_repo,
            page_repo,
        }
    }

    // ==================== Friendships ====================

    /// Send a friend request from `requester_id` to `recipient_id`.
    ///
    /// Pairs are ordered, so a request in the opposite direction is a
    /// separate row.
    pub async fn send_friend_request(
        &self,
        requester_id: i64,
        recipient_id: i64,
    ) -> AppResult<friendship::Model> {
        self.account_repo.get_by_id(requester_id).await?;
        self.account_repo.get_by_id(recipient_id).await?;

        let friendship = self
            .friendship_repo
            .create(requester_id, recipient_id)
            .await?;
        debug!(
            friendship_id = friendship.friendship_id,
            requester_id, recipient_id, "Friend request sent"
        );
        Ok(friendship)
    }

    /// Accept, reject or block a friendship.
    pub async fn set_friendship_status(
        &self,
        friendship_id: i64,
        status: FriendshipStatus,
    ) -> AppResult<friendship::Model> {
        self.friendship_repo.set_status(friendship_id, status).await
    }

    // ==================== Communities ====================

    /// Create a community.
    pub async fn create_community(
        &self,
        input: CreateCommunityInput,
    ) -> AppResult<community::Model> {
        input.validate()?;
        if let Some(owner_id) = input.owner_id {
            self.account_repo.get_by_id(owner_id).await?;
        }

        let model = community::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            privacy: Set(input.privacy),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let community = self.community_repo.create(model, input.owner_id).await?;
        info!(community_id = community.community_id, "Community created");
        Ok(community)
    }

    /// Add an account to a community as a regular member.
    pub async fn join_community(
        &self,
        community_id: i64,
        user_id: i64,
    ) -> AppResult<community_member::Model> {
        self.community_repo
            .find_by_id(community_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Community {community_id}")))?;
        self.account_repo.get_by_id(user_id).await?;

        self.community_repo
            .add_member(community_id, user_id, MemberRole::Member)
            .await
    }

    // ==================== Page follows ====================

    /// Follow a page.
    pub async fn follow_page(&self, user_id: i64, page_id: i64) -> AppResult<follow_page::Model> {
        self.account_repo.get_by_id(user_id).await?;
        self.page_repo.get_by_id(page_id).await?;

        self.follow_repo.create(user_id, page_id).await
    }

    /// Unfollow a page. Returns whether a follow existed.
    pub async fn unfollow_page(&self, user_id: i64, page_id: i64) -> AppResult<bool> {
        self.follow_repo.delete(user_id, page_id).await
    }
}

//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod event;
pub mod messaging;
pub mod moderation;
pub mod notification;
pub mod page;
pub mod post;
pub mod profile;
pub mod social;
pub mod token;

pub use auth::{AuthResponse, AuthService, LoginInput, SignupInput, UserSummary};
pub use event::EventService;
pub use messaging::MessagingService;
pub use moderation::ModerationService;
pub use notification::NotificationService;
pub use page::PageService;
pub use post::PostService;
pub use profile::ProfileService;
pub use social::SocialService;
pub use token::{Claims, TokenPair, TokenService, TokenType};

use campus_common::{AppError, AppResult};
use campus_db::Actor;
use campus_db::repositories::{AccountRepository, PageRepository};

/// Fail unless the account or page behind `actor` exists.
pub(crate) async fn ensure_actor_exists(
    accounts: &AccountRepository,
    pages: &PageRepository,
    actor: Actor,
) -> AppResult<()> {
    let found = match actor {
        Actor::Account(id) => accounts.find_by_id(id).await?.is_some(),
        Actor::Page(id) => pages.find_by_id(id).await?.is_some(),
    };
    if found {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Actor {actor}")))
    }
}

//! Database repositories.

mod account;
mod comment;
mod community;
mod event;
mod follow_page;
mod friendship;
mod messaging;
mod notification;
mod page;
mod post;
mod profile;
mod report;
mod token;

pub use account::AccountRepository;
pub use comment::CommentRepository;
pub use community::CommunityRepository;
pub use event::EventRepository;
pub use follow_page::FollowPageRepository;
pub use friendship::FriendshipRepository;
pub use messaging::MessagingRepository;
pub use notification::NotificationRepository;
pub use page::PageRepository;
pub use post::PostRepository;
pub use profile::ProfileRepository;
pub use report::ReportRepository;
pub use token::{IssuedToken, TokenRepository};

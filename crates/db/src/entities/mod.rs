//! Database entities.

#![allow(missing_docs)]

pub mod account;
pub mod admin;
pub mod blacklisted_token;
pub mod comment;
pub mod comment_reaction;
pub mod community;
pub mod community_member;
pub mod conversation;
pub mod conversation_member;
pub mod event;
pub mod event_reminder;
pub mod follow_page;
pub mod friendship;
pub mod instructor;
pub mod message;
pub mod message_media;
pub mod message_reaction;
pub mod notification;
pub mod outstanding_token;
pub mod page;
pub mod post;
pub mod post_media;
pub mod post_reaction;
pub mod report;
pub mod student;
pub mod user_profile;

pub use account::Entity as Account;
pub use admin::Entity as Admin;
pub use blacklisted_token::Entity as BlacklistedToken;
pub use comment::Entity as Comment;
pub use comment_reaction::Entity as CommentReaction;
pub use community::Entity as Community;
pub use community_member::Entity as CommunityMember;
pub use conversation::Entity as Conversation;
pub use conversation_member::Entity as ConversationMember;
pub use event::Entity as Event;
pub use event_reminder::Entity as EventReminder;
pub use follow_page::Entity as FollowPage;
pub use friendship::Entity as Friendship;
pub use instructor::Entity as Instructor;
pub use message::Entity as Message;
pub use message_media::Entity as MessageMedia;
pub use message_reaction::Entity as MessageReaction;
pub use notification::Entity as Notification;
pub use outstanding_token::Entity as OutstandingToken;
pub use page::Entity as Page;
pub use post::Entity as Post;
pub use post_media::Entity as PostMedia;
pub use post_reaction::Entity as PostReaction;
pub use report::Entity as Report;
pub use student::Entity as Student;
pub use user_profile::Entity as UserProfile;

//! Database repositories.

mod bookmark;
mod comment;
mod follow;
mod notification;
mod post;
mod user;

pub use bookmark::BookmarkRepository;
pub use comment::CommentRepository;
pub use follow::FollowRepository;
pub use notification::NotificationRepository;
pub use post::PostRepository;
pub use user::UserRepository;

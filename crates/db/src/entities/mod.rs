//! Database entities.

pub mod bookmark;
pub mod comment;
pub mod follow;
pub mod notification;
pub mod post;
pub mod user;

pub use bookmark::Entity as Bookmark;
pub use comment::Entity as Comment;
pub use follow::Entity as Follow;
pub use notification::Entity as Notification;
pub use post::Entity as Post;
pub use user::Entity as User;

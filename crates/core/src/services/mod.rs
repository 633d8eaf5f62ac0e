//! Business logic services.

#![allow(missing_docs)]

pub mod bookmark;
pub mod comment;
pub mod follow;
pub mod notification;
pub mod post;
pub mod user;

pub use bookmark::{BookmarkService, BookmarkedPost};
pub use comment::{AddCommentInput, CommentAuthor, CommentService, CommentWithAuthor};
pub use follow::{FollowService, FollowState, FollowingEntry};
pub use notification::{NotificationSender, NotificationService, NotificationWithSender};
pub use post::{CreatePostInput, PostService};
pub use user::{CreateUserInput, UpdateProfileInput, UserService};

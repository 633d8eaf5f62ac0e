//! Render models for the snapfeed client screens.
//!
//! Views are pure functions of query results: they never touch the database
//! and take the current time as a parameter, so a stale result simply
//! re-renders when a newer one arrives.
//!
//! # Features
//!
//! - **Bookmarks**: the bookmarked-posts grid via [`FeedState`]
//! - **Comments**: a single comment row via [`CommentView`]
//! - **Relative time**: "5 minutes ago" style strings via [`time_ago`]
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use snapfeed_views::time_ago;
//!
//! let now = Utc::now();
//! assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
//! ```

mod bookmarks;
mod comment;
mod html;
mod time_ago;

pub use bookmarks::{FeedState, GRID_COLUMNS, Tile};
pub use comment::{CommentView, render_comments};
pub use time_ago::{format_distance, time_ago};

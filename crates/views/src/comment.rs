//! A single comment row.

use chrono::{DateTime, Utc};
use serde::Serialize;
use snapfeed_core::CommentWithAuthor;

use crate::{html::html_escape, time_ago::time_ago};

/// Display model of a comment: avatar, author name, body and relative time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Author avatar URL.
    pub avatar_url: String,
    /// Author display name.
    pub author_name: String,
    /// Comment text.
    pub body: String,
    /// e.g. "5 minutes ago".
    pub relative_time: String,
}

impl CommentView {
    /// Build the row for `comment` as seen at `now`.
    #[must_use]
    pub fn new(comment: &CommentWithAuthor, now: DateTime<Utc>) -> Self {
        Self {
            avatar_url: comment.user.image.clone(),
            author_name: comment.user.fullname.clone(),
            body: comment.content.clone(),
            relative_time: time_ago(comment.created_at.with_timezone(&Utc), now),
        }
    }

    /// Render the row as an HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"comment\"><img class=\"comment-avatar\" src=\"{}\" /><div class=\"comment-content\"><span class=\"comment-username\">{}</span><p class=\"comment-text\">{}</p><span class=\"comment-time\">{}</span></div></div>",
            html_escape(&self.avatar_url),
            html_escape(&self.author_name),
            html_escape(&self.body),
            html_escape(&self.relative_time)
        )
    }
}

/// Render a list of comments, in the order given.
#[must_use]
pub fn render_comments(comments: &[CommentWithAuthor], now: DateTime<Utc>) -> String {
    comments
        .iter()
        .map(|c| CommentView::new(c, now).to_html())
        .collect()
}

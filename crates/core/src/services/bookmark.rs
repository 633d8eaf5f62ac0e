//! Bookmark service.

use chrono::Utc;
use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;
use snapfeed_common::{AppError, AppResult, IdGenerator, Identity};
use snapfeed_db::{
    entities::bookmark,
    repositories::{BookmarkRepository, PostRepository, UserRepository},
};

use super::user::resolve_caller;

/// Bookmark service for business logic.
#[derive(Clone)]
pub struct BookmarkService {
    bookmark_repo: BookmarkRepository,
    post_repo: PostRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// A bookmarked post as shown in the bookmarks grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedPost {
    /// Post ID.
    pub id: String,
    /// Author of the post.
    pub user_id: String,
    /// Image URL of the post.
    pub image_url: String,
    /// Caption, if any.
    pub caption: Option<String>,
    /// Like count.
    pub likes: i32,
    /// Comment count.
    pub comments: i32,
    /// When the post was created.
    pub created_at: DateTimeWithTimeZone,
    /// When the caller bookmarked it.
    pub bookmarked_at: DateTimeWithTimeZone,
}

impl BookmarkService {
    /// Create a new bookmark service.
    #[must_use]
    pub const fn new(
        bookmark_repo: BookmarkRepository,
        post_repo: PostRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            bookmark_repo,
            post_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Bookmark `post_id` for the caller, or remove the bookmark if present.
    ///
    /// Returns whether the post is bookmarked afterwards. Removing works even
    /// when the post is gone; adding requires the post to exist.
    pub async fn toggle_bookmark(&self, identity: &Identity, post_id: &str) -> AppResult<bool> {
        let caller = resolve_caller(&self.user_repo, identity).await?;

        let txn = self.user_repo.begin().await?;

        let existing =
            BookmarkRepository::find_by_user_and_post_in(&txn, &caller.id, post_id).await?;

        let bookmarked = if let Some(bookmark) = existing {
            BookmarkRepository::delete_in(&txn, &bookmark.id).await?;
            false
        } else {
            if PostRepository::find_by_id_in(&txn, post_id).await?.is_none() {
                return Err(AppError::PostNotFound(post_id.to_string()));
            }

            let model = bookmark::ActiveModel {
                id: Set(self.id_gen.generate()),
                user_id: Set(caller.id.clone()),
                post_id: Set(post_id.to_string()),
                created_at: Set(Utc::now().into()),
            };
            BookmarkRepository::create_in(&txn, model).await?;
            true
        };

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id = %caller.id, post_id = %post_id, bookmarked, "Toggled bookmark");
        Ok(bookmarked)
    }

    /// The caller's bookmarks, newest first, each joined to its post.
    ///
    /// Bookmarks whose post was deleted stay in the list as `None` so the
    /// client can tell them apart from an empty result.
    pub async fn get_bookmarked_posts(
        &self,
        identity: &Identity,
    ) -> AppResult<Vec<Option<BookmarkedPost>>> {
        let caller = resolve_caller(&self.user_repo, identity).await?;

        let bookmarks = self.bookmark_repo.find_by_user(&caller.id).await?;
        let post_ids: Vec<String> = bookmarks.iter().map(|b| b.post_id.clone()).collect();
        let posts = self.post_repo.find_by_ids(&post_ids).await?;

        Ok(bookmarks
            .into_iter()
            .map(|b| {
                posts
                    .iter()
                    .find(|p| p.id == b.post_id)
                    .map(|p| BookmarkedPost {
                        id: p.id.clone(),
                        user_id: p.user_id.clone(),
                        image_url: p.image_url.clone(),
                        caption: p.caption.clone(),
                        likes: p.likes,
                        comments: p.comments,
                        created_at: p.created_at,
                        bookmarked_at: b.created_at,
                    })
            })
            .collect())
    }
}

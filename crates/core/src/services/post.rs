//! Post service.

use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use snapfeed_common::{AppError, AppResult, IdGenerator, Identity};
use snapfeed_db::{
    entities::post,
    repositories::{CommentRepository, PostRepository, UserRepository},
};
use validator::Validate;

use super::user::resolve_caller;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a post.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    /// Uploaded image URL.
    #[validate(length(min = 1, max = 2048))]
    pub image_url: String,

    /// Optional caption.
    #[validate(length(max = 2200))]
    pub caption: Option<String>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, user_repo: UserRepository) -> Self {
        Self {
            post_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Publish a post as the caller and bump their `posts` counter.
    pub async fn create_post(
        &self,
        identity: &Identity,
        input: CreatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;
        let caller = resolve_caller(&self.user_repo, identity).await?;

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(caller.id.clone()),
            image_url: Set(input.image_url),
            caption: Set(input.caption),
            likes: Set(0),
            comments: Set(0),
            created_at: Set(Utc::now().into()),
        };

        let txn = self.user_repo.begin().await?;
        let post = PostRepository::create_in(&txn, model).await?;
        UserRepository::adjust_posts_count_in(&txn, &caller.id, 1).await?;
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(post_id = %post.id, user_id = %caller.id, "Created post");
        Ok(post)
    }

    /// Delete one of the caller's posts along with its comments.
    ///
    /// Bookmarks of the post are left in place and read back as empty slots.
    pub async fn delete_post(&self, identity: &Identity, post_id: &str) -> AppResult<()> {
        let caller = resolve_caller(&self.user_repo, identity).await?;

        let txn = self.user_repo.begin().await?;
        let post = PostRepository::find_by_id_in(&txn, post_id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))?;

        if post.user_id != caller.id {
            return Err(AppError::Forbidden(
                "You can only delete your own posts".to_string(),
            ));
        }

        let removed = CommentRepository::delete_by_post_in(&txn, post_id).await?;
        // A concurrent delete already took the row and its counter decrement
        if !PostRepository::delete_in(&txn, post_id).await? {
            return Err(AppError::PostNotFound(post_id.to_string()));
        }
        UserRepository::adjust_posts_count_in(&txn, &caller.id, -1).await?;
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(post_id = %post_id, comments_removed = removed, "Deleted post");
        Ok(())
    }

    /// Posts by a user, newest first.
    pub async fn get_posts_by_user(&self, user_id: &str) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_by_user(user_id).await
    }
}

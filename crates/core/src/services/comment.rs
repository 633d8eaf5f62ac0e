//! Comment service.

use chrono::Utc;
use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::{Deserialize, Serialize};
use snapfeed_common::{AppError, AppResult, IdGenerator, Identity};
use snapfeed_db::{
    entities::{comment, notification, notification::NotificationType},
    repositories::{CommentRepository, NotificationRepository, PostRepository, UserRepository},
};
use validator::Validate;

use super::user::resolve_caller;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for adding a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCommentInput {
    /// Comment text.
    #[validate(length(min = 1, max = 2200))]
    pub content: String,
}

/// Author fields denormalized onto a comment for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    /// Display name.
    pub fullname: String,
    /// Avatar URL.
    pub image: String,
}

/// A comment joined with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    /// Comment ID.
    pub id: String,
    /// Post the comment belongs to.
    pub post_id: String,
    /// Comment text.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTimeWithTimeZone,
    /// Author of the comment.
    pub user: CommentAuthor,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(comment_repo: CommentRepository, user_repo: UserRepository) -> Self {
        Self {
            comment_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Comment on a post as the caller.
    ///
    /// Bumps the post's `comments` counter and notifies the post's author,
    /// unless the author is the caller.
    pub async fn add_comment(
        &self,
        identity: &Identity,
        post_id: &str,
        input: AddCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;
        let caller = resolve_caller(&self.user_repo, identity).await?;

        let txn = self.user_repo.begin().await?;

        let post = PostRepository::find_by_id_in(&txn, post_id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(caller.id.clone()),
            post_id: Set(post.id.clone()),
            content: Set(input.content),
            created_at: Set(Utc::now().into()),
        };
        let comment = CommentRepository::create_in(&txn, model).await?;

        PostRepository::adjust_comments_count_in(&txn, &post.id, 1).await?;

        if post.user_id != caller.id {
            let notification = notification::ActiveModel {
                id: Set(self.id_gen.generate()),
                receiver_id: Set(post.user_id.clone()),
                sender_id: Set(caller.id.clone()),
                notification_type: Set(NotificationType::Comment),
                post_id: Set(Some(post.id.clone())),
                comment_id: Set(Some(comment.id.clone())),
                created_at: Set(Utc::now().into()),
            };
            NotificationRepository::create_in(&txn, notification).await?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(comment_id = %comment.id, post_id = %post.id, "Added comment");
        Ok(comment)
    }

    /// Comments on a post, oldest first, with their authors.
    ///
    /// Comments whose author no longer resolves are left out.
    pub async fn get_comments(&self, post_id: &str) -> AppResult<Vec<CommentWithAuthor>> {
        let comments = self.comment_repo.find_by_post(post_id).await?;

        let mut author_ids: Vec<String> = comments.iter().map(|c| c.user_id.clone()).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors = self.user_repo.find_by_ids(&author_ids).await?;

        Ok(comments
            .into_iter()
            .filter_map(|c| {
                let author = authors.iter().find(|u| u.id == c.user_id)?;
                Some(CommentWithAuthor {
                    user: CommentAuthor {
                        fullname: author.fullname.clone(),
                        image: author.image.clone(),
                    },
                    id: c.id,
                    post_id: c.post_id,
                    content: c.content,
                    created_at: c.created_at,
                })
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use snapfeed_db::entities::user;
    use std::sync::Arc;

    fn create_test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: format!("{id}_name"),
            fullname: format!("{id} Full"),
            email: format!("{id}@example.com"),
            bio: None,
            image: format!("https://img.example.com/{id}.png"),
            clerk_id: format!("user_{id}"),
            followers: 0,
            following: 0,
            posts: 0,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_comment(id: &str, user_id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            post_id: "p1".to_string(),
            content: format!("comment {id}"),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_comments_joins_authors() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    create_test_comment("c1", "u1"),
                    create_test_comment("c2", "u2"),
                    create_test_comment("c3", "u1"),
                ]])
                .append_query_results([vec![create_test_user("u1"), create_test_user("u2")]])
                .into_connection(),
        );

        let service = CommentService::new(CommentRepository::new(db.clone()), UserRepository::new(db));
        let comments = service.get_comments("p1").await.unwrap();

        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].user.fullname, "u1 Full");
        assert_eq!(comments[1].user.image, "https://img.example.com/u2.png");
        assert_eq!(comments[2].content, "comment c3");
    }

    #[tokio::test]
    async fn test_add_comment_rejects_empty_content() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = CommentService::new(CommentRepository::new(db.clone()), UserRepository::new(db));
        let result = service
            .add_comment(
                &Identity::verified("user_u1"),
                "p1",
                AddCommentInput {
                    content: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_comment_with_author_serializes_camel_case() {
        let comment = CommentWithAuthor {
            id: "c1".to_string(),
            post_id: "p1".to_string(),
            content: "hi".to_string(),
            created_at: Utc::now().into(),
            user: CommentAuthor {
                fullname: "Alice".to_string(),
                image: "a.png".to_string(),
            },
        };

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["postId"], "p1");
        assert_eq!(json["user"]["fullname"], "Alice");
    }
}

//! Bookmark repository.

use std::sync::Arc;

use crate::entities::{Bookmark, bookmark};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use snapfeed_common::{AppError, AppResult};

/// Bookmark repository for database operations.
#[derive(Clone)]
pub struct BookmarkRepository {
    db: Arc<DatabaseConnection>,
}

impl BookmarkRepository {
    /// Create a new bookmark repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user's bookmark of a post.
    pub async fn find_by_user_and_post_in<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        post_id: &str,
    ) -> AppResult<Option<bookmark::Model>> {
        Bookmark::find()
            .filter(bookmark::Column::UserId.eq(user_id))
            .filter(bookmark::Column::PostId.eq(post_id))
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user has bookmarked a post.
    pub async fn is_bookmarked(&self, user_id: &str, post_id: &str) -> AppResult<bool> {
        Ok(
            Self::find_by_user_and_post_in(self.db.as_ref(), user_id, post_id)
                .await?
                .is_some(),
        )
    }

    /// Insert a new bookmark.
    pub async fn create_in<C: ConnectionTrait>(
        conn: &C,
        model: bookmark::ActiveModel,
    ) -> AppResult<bookmark::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a bookmark by ID.
    pub async fn delete_in<C: ConnectionTrait>(conn: &C, id: &str) -> AppResult<()> {
        Bookmark::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Bookmarks of a user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<bookmark::Model>> {
        Bookmark::find()
            .filter(bookmark::Column::UserId.eq(user_id))
            .order_by_desc(bookmark::Column::CreatedAt)
            .order_by_desc(bookmark::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_bookmark(id: &str, user_id: &str, post_id: &str) -> bookmark::Model {
        bookmark::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_is_bookmarked() {
        let bookmark = create_test_bookmark("b1", "alice", "p1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[bookmark]])
                .append_query_results([Vec::<bookmark::Model>::new()])
                .into_connection(),
        );

        let repo = BookmarkRepository::new(db);
        assert!(repo.is_bookmarked("alice", "p1").await.unwrap());
        assert!(!repo.is_bookmarked("alice", "p2").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let b1 = create_test_bookmark("b2", "alice", "p2");
        let b2 = create_test_bookmark("b1", "alice", "p1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[b1, b2]])
                .into_connection(),
        );

        let repo = BookmarkRepository::new(db);
        let result = repo.find_by_user("alice").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].post_id, "p2");
    }
}

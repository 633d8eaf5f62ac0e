//! User repository.

use std::sync::Arc;

use crate::entities::{User, user};
use snapfeed_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, SqlErr, TransactionTrait, sea_query::Expr,
};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Start a transaction on the underlying connection.
    pub async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        Self::find_by_id_in(self.db.as_ref(), id).await
    }

    /// Find a user by ID on the given connection.
    pub async fn find_by_id_in<C: ConnectionTrait>(
        conn: &C,
        id: &str,
    ) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find users by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        User::find()
            .filter(user::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by identity provider subject.
    pub async fn find_by_clerk_id(&self, clerk_id: &str) -> AppResult<Option<user::Model>> {
        Self::find_by_clerk_id_in(self.db.as_ref(), clerk_id).await
    }

    /// Find a user by identity provider subject on the given connection.
    pub async fn find_by_clerk_id_in<C: ConnectionTrait>(
        conn: &C,
        clerk_id: &str,
    ) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::ClerkId.eq(clerk_id))
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    ///
    /// Returns `None` when the insert hits a unique index, i.e. a user for
    /// the same `clerk_id` was written concurrently.
    pub async fn try_create(&self, model: user::ActiveModel) -> AppResult<Option<user::Model>> {
        match model.insert(self.db.as_ref()).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::debug!(error = %e, "User insert hit a unique index");
                Ok(None)
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Shift the follow counters of both ends of an edge by `delta`.
    ///
    /// The follower's `following` and the followed user's `followers` move
    /// together. Nothing is written unless both rows exist; the return value
    /// says whether the adjustment was applied.
    pub async fn adjust_follow_counts_in<C: ConnectionTrait>(
        conn: &C,
        follower_id: &str,
        following_id: &str,
        delta: i32,
    ) -> AppResult<bool> {
        let follower = Self::find_by_id_in(conn, follower_id).await?;
        let following = Self::find_by_id_in(conn, following_id).await?;

        if follower.is_none() || following.is_none() {
            tracing::debug!(
                follower_id,
                following_id,
                "Skipping follow count adjustment, user record missing"
            );
            return Ok(false);
        }

        Self::add_to_column_in(conn, follower_id, user::Column::Following, delta).await?;
        Self::add_to_column_in(conn, following_id, user::Column::Followers, delta).await?;

        Ok(true)
    }

    /// Shift the posts counter of a user by `delta`.
    pub async fn adjust_posts_count_in<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        delta: i32,
    ) -> AppResult<()> {
        Self::add_to_column_in(conn, user_id, user::Column::Posts, delta).await
    }

    /// Add `delta` to a counter column (single UPDATE query, no fetch).
    async fn add_to_column_in<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        column: user::Column,
        delta: i32,
    ) -> AppResult<()> {
        User::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(user::Column::Id.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

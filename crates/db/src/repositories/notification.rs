//! Notification repository.

use std::sync::Arc;

use crate::entities::{Notification, notification};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use snapfeed_common::{AppError, AppResult};

/// Notification repository for database operations.
///
/// Notifications are append-only; there is no update or delete.
#[derive(Clone)]
pub struct NotificationRepository {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepository {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a notification.
    pub async fn create(&self, model: notification::ActiveModel) -> AppResult<notification::Model> {
        Self::create_in(self.db.as_ref(), model).await
    }

    /// Append a notification on the given connection.
    pub async fn create_in<C: ConnectionTrait>(
        conn: &C,
        model: notification::ActiveModel,
    ) -> AppResult<notification::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Notifications received by a user, newest first.
    pub async fn find_by_receiver(
        &self,
        receiver_id: &str,
    ) -> AppResult<Vec<notification::Model>> {
        Notification::find()
            .filter(notification::Column::ReceiverId.eq(receiver_id))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

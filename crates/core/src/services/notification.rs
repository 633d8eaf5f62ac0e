//! Notification service.

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use snapfeed_common::{AppResult, Identity};
use snapfeed_db::{
    entities::notification::NotificationType,
    repositories::{NotificationRepository, PostRepository, UserRepository},
};

use super::user::resolve_caller;

/// Notification service for business logic.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    user_repo: UserRepository,
    post_repo: PostRepository,
}

/// Sender details attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSender {
    /// Sender user ID.
    pub id: String,
    /// Sender handle.
    pub username: String,
    /// Sender avatar URL.
    pub image: String,
}

/// A notification joined with the user who caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationWithSender {
    /// Notification ID.
    pub id: String,
    /// What happened.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// `None` when the sender no longer resolves.
    pub sender: Option<NotificationSender>,
    /// Related post, for likes and comments.
    pub post_id: Option<String>,
    /// Image of the related post, if it still exists.
    pub post_image_url: Option<String>,
    /// Related comment, for comment notifications.
    pub comment_id: Option<String>,
    /// When the notification was created.
    pub created_at: DateTimeWithTimeZone,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(
        notification_repo: NotificationRepository,
        user_repo: UserRepository,
        post_repo: PostRepository,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
            post_repo,
        }
    }

    /// The caller's notifications, newest first.
    pub async fn get_notifications(
        &self,
        identity: &Identity,
    ) -> AppResult<Vec<NotificationWithSender>> {
        let caller = resolve_caller(&self.user_repo, identity).await?;

        let notifications = self.notification_repo.find_by_receiver(&caller.id).await?;

        let mut sender_ids: Vec<String> =
            notifications.iter().map(|n| n.sender_id.clone()).collect();
        sender_ids.sort();
        sender_ids.dedup();
        let senders = self.user_repo.find_by_ids(&sender_ids).await?;

        let post_ids: Vec<String> = notifications
            .iter()
            .filter_map(|n| n.post_id.clone())
            .collect();
        let posts = self.post_repo.find_by_ids(&post_ids).await?;

        Ok(notifications
            .into_iter()
            .map(|n| {
                let sender = senders
                    .iter()
                    .find(|u| u.id == n.sender_id)
                    .map(|u| NotificationSender {
                        id: u.id.clone(),
                        username: u.username.clone(),
                        image: u.image.clone(),
                    });
                let post_image_url = n.post_id.as_ref().and_then(|post_id| {
                    posts
                        .iter()
                        .find(|p| &p.id == post_id)
                        .map(|p| p.image_url.clone())
                });

                NotificationWithSender {
                    id: n.id,
                    notification_type: n.notification_type,
                    sender,
                    post_id: n.post_id,
                    post_image_url,
                    comment_id: n.comment_id,
                    created_at: n.created_at,
                }
            })
            .collect())
    }
}

//! Follow service.

use chrono::Utc;
use sea_orm::Set;
use serde::Serialize;
use snapfeed_common::{AppError, AppResult, IdGenerator, Identity, config::FollowConfig};
use snapfeed_db::{
    entities::{follow, notification, notification::NotificationType, user},
    repositories::{FollowRepository, NotificationRepository, UserRepository},
};

use super::user::resolve_caller;

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    config: FollowConfig,
    id_gen: IdGenerator,
}

/// State of the edge after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FollowState {
    /// The edge was created.
    Followed,
    /// The edge was removed.
    Unfollowed,
}

impl FollowState {
    /// Whether the caller follows the target after the toggle.
    #[must_use]
    pub const fn is_following(self) -> bool {
        matches!(self, Self::Followed)
    }
}

/// One entry of the caller's following list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingEntry {
    /// ID of the user the entry shows.
    pub user_id: String,
    /// Edge ID; `None` for the caller's own entry.
    pub follow_id: Option<String>,
    /// `None` when the followed user no longer resolves.
    pub username: Option<String>,
    /// `None` when the followed user no longer resolves.
    pub image: Option<String>,
    /// Set on the synthetic first entry that represents the caller.
    pub is_self: bool,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub const fn new(
        follow_repo: FollowRepository,
        user_repo: UserRepository,
        config: FollowConfig,
    ) -> Self {
        Self {
            follow_repo,
            user_repo,
            config,
            id_gen: IdGenerator::new(),
        }
    }

    /// Whether the caller follows `target_id`.
    pub async fn is_following(&self, identity: &Identity, target_id: &str) -> AppResult<bool> {
        let caller = resolve_caller(&self.user_repo, identity).await?;
        self.follow_repo.is_following(&caller.id, target_id).await
    }

    /// Follow `target_id` if the caller does not follow them yet, unfollow otherwise.
    ///
    /// The edge change, both counter updates and the notification are written
    /// in one transaction. Counters are left alone when either user record is
    /// missing; the edge and notification are still written.
    pub async fn toggle_follow(
        &self,
        identity: &Identity,
        target_id: &str,
    ) -> AppResult<FollowState> {
        let caller = resolve_caller(&self.user_repo, identity).await?;

        if caller.id == target_id && !self.config.allow_self_follow {
            tracing::warn!(user_id = %caller.id, "Rejected self-follow");
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        let txn = self.user_repo.begin().await?;

        let existing = FollowRepository::find_by_pair_in(&txn, &caller.id, target_id).await?;

        let (state, notification_type, delta) = if let Some(edge) = existing {
            if !FollowRepository::delete_in(&txn, &edge.id).await? {
                // A concurrent unfollow removed the edge first and already
                // adjusted the counters.
                txn.commit()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                tracing::debug!(
                    follower_id = %caller.id,
                    following_id = %target_id,
                    "Edge already removed"
                );
                return Ok(FollowState::Unfollowed);
            }
            (FollowState::Unfollowed, NotificationType::Unfollow, -1)
        } else {
            let model = follow::ActiveModel {
                id: Set(self.id_gen.generate()),
                follower_id: Set(caller.id.clone()),
                following_id: Set(target_id.to_string()),
                created_at: Set(Utc::now().into()),
            };
            FollowRepository::create_in(&txn, model).await?;
            (FollowState::Followed, NotificationType::Follow, 1)
        };

        UserRepository::adjust_follow_counts_in(&txn, &caller.id, target_id, delta).await?;

        let notification = notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            receiver_id: Set(target_id.to_string()),
            sender_id: Set(caller.id.clone()),
            notification_type: Set(notification_type),
            post_id: Set(None),
            comment_id: Set(None),
            created_at: Set(Utc::now().into()),
        };
        NotificationRepository::create_in(&txn, notification).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            follower_id = %caller.id,
            following_id = %target_id,
            state = ?state,
            "Toggled follow"
        );

        Ok(state)
    }

    /// The caller's following list, newest edge first.
    ///
    /// Always starts with a synthetic entry for the caller, labelled with
    /// `follow.self_story_label`. Edges whose target no longer resolves are
    /// kept with empty `username` and `image`.
    pub async fn get_following(&self, identity: &Identity) -> AppResult<Vec<FollowingEntry>> {
        let caller = resolve_caller(&self.user_repo, identity).await?;

        let edges = self.follow_repo.find_by_follower(&caller.id).await?;
        let target_ids: Vec<String> = edges.iter().map(|e| e.following_id.clone()).collect();
        let targets = self.user_repo.find_by_ids(&target_ids).await?;

        let mut entries = Vec::with_capacity(edges.len() + 1);
        entries.push(FollowingEntry {
            user_id: caller.id.clone(),
            follow_id: None,
            username: Some(self.config.self_story_label.clone()),
            image: Some(caller.image),
            is_self: true,
        });

        entries.extend(edges.into_iter().map(|edge| {
            let target = targets.iter().find(|u| u.id == edge.following_id);
            FollowingEntry {
                username: target.map(|u| u.username.clone()),
                image: target.map(|u| u.image.clone()),
                user_id: edge.following_id,
                follow_id: Some(edge.id),
                is_self: false,
            }
        }));

        Ok(entries)
    }

    /// Users following `user_id`, newest edge first. Unresolvable followers are skipped.
    pub async fn get_followers(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        let edges = self.follow_repo.find_by_following(user_id).await?;
        let follower_ids: Vec<String> = edges.iter().map(|e| e.follower_id.clone()).collect();
        let users = self.user_repo.find_by_ids(&follower_ids).await?;

        Ok(follower_ids
            .iter()
            .filter_map(|id| users.iter().find(|u| &u.id == id).cloned())
            .collect())
    }

    /// Follower and following counts taken from the edge table rather than
    /// the denormalized counters, as `(followers, following)`.
    pub async fn count_edges(&self, user_id: &str) -> AppResult<(u64, u64)> {
        let followers = self.follow_repo.count_followers(user_id).await?;
        let following = self.follow_repo.count_following(user_id).await?;
        Ok((followers, following))
    }
}

//! API middleware and shared state.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use sea_orm::DatabaseConnection;
use snapfeed_common::Config;
use snapfeed_core::{
    BookmarkService, CommentService, FollowService, NotificationService, PostService, UserService,
};
use snapfeed_db::repositories::{
    BookmarkRepository, CommentRepository, FollowRepository, NotificationRepository,
    PostRepository, UserRepository,
};

use crate::auth::TokenVerifier;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// User records and profiles.
    pub user_service: UserService,
    /// Follow edges.
    pub follow_service: FollowService,
    /// Posts.
    pub post_service: PostService,
    /// Comments on posts.
    pub comment_service: CommentService,
    /// Bookmarks.
    pub bookmark_service: BookmarkService,
    /// Notification inbox.
    pub notification_service: NotificationService,
    /// Bearer token verification.
    pub verifier: TokenVerifier,
}

impl AppState {
    /// Wire repositories and services over one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, config: &Config) -> Self {
        let user_repo = UserRepository::new(Arc::clone(&db));
        let follow_repo = FollowRepository::new(Arc::clone(&db));
        let post_repo = PostRepository::new(Arc::clone(&db));
        let comment_repo = CommentRepository::new(Arc::clone(&db));
        let bookmark_repo = BookmarkRepository::new(Arc::clone(&db));
        let notification_repo = NotificationRepository::new(db);

        Self {
            user_service: UserService::new(user_repo.clone()),
            follow_service: FollowService::new(
                follow_repo,
                user_repo.clone(),
                config.follow.clone(),
            ),
            post_service: PostService::new(post_repo.clone(), user_repo.clone()),
            comment_service: CommentService::new(comment_repo, user_repo.clone()),
            bookmark_service: BookmarkService::new(
                bookmark_repo,
                post_repo.clone(),
                user_repo.clone(),
            ),
            notification_service: NotificationService::new(
                notification_repo,
                user_repo,
                post_repo,
            ),
            verifier: TokenVerifier::new(&config.auth),
        }
    }
}

/// Authentication middleware.
///
/// A valid `Authorization: Bearer` token puts the verified
/// [`Identity`](snapfeed_common::Identity) into the request extensions.
/// Anything else leaves the request anonymous.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get(AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(identity) = state.verifier.verify(token)
    {
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}

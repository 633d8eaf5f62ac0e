//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use serde::Serialize;
use snapfeed_common::AppResult;
use snapfeed_core::{CreateUserInput, UpdateProfileInput};
use snapfeed_db::entities::{post, user};

use crate::{extractors::VerifiedCaller, middleware::AppState, response::ApiResponse};

/// Public user record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Record ID.
    pub id: String,
    /// Unique handle.
    pub username: String,
    /// Display name.
    pub fullname: String,
    /// Contact email.
    pub email: String,
    /// Profile bio.
    pub bio: Option<String>,
    /// Avatar URL.
    pub image: String,
    /// External identity token.
    pub clerk_id: String,
    /// Followers count.
    pub followers: i32,
    /// Following count.
    pub following: i32,
    /// Posts count.
    pub posts: i32,
    /// RFC 3339 creation time.
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            email: user.email,
            bio: user.bio,
            image: user.image,
            clerk_id: user.clerk_id,
            followers: user.followers,
            following: user.following,
            posts: user.posts,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// A post as listed on a profile.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// Record ID.
    pub id: String,
    /// Author ID.
    pub user_id: String,
    /// Post image URL.
    pub image_url: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// Likes count.
    pub likes: i32,
    /// Comments count.
    pub comments: i32,
    /// RFC 3339 creation time.
    pub created_at: String,
}

impl From<post::Model> for PostResponse {
    fn from(post: post::Model) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            image_url: post.image_url,
            caption: post.caption,
            likes: post.likes,
            comments: post.comments,
            created_at: post.created_at.to_rfc3339(),
        }
    }
}

/// Register the user behind an identity token. Repeated calls return the
/// existing record.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.create_user(input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Look a user up by identity token. `data` is `null` when none is registered.
async fn by_clerk_id(
    State(state): State<AppState>,
    Path(clerk_id): Path<String>,
) -> AppResult<ApiResponse<Option<UserResponse>>> {
    let user = state.user_service.get_by_clerk_id(&clerk_id).await?;
    Ok(ApiResponse::ok(user.map(Into::into)))
}

async fn update_me(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.update_profile(&identity, input).await?;
    Ok(ApiResponse::ok(user.into()))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_profile(&id).await?;
    Ok(ApiResponse::ok(user.into()))
}

async fn posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.get_posts_by_user(&id).await?;
    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

async fn followers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.follow_service.get_followers(&id).await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/me", patch(update_me))
        .route("/by-clerk-id/{clerk_id}", get(by_clerk_id))
        .route("/{id}", get(show))
        .route("/{id}/posts", get(posts))
        .route("/{id}/followers", get(followers))
}

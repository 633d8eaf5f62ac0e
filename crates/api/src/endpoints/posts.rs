//! Post and comment endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{Html, IntoResponse},
    routing::{delete, get, post},
};
use serde::Serialize;
use snapfeed_common::AppResult;
use snapfeed_core::{AddCommentInput, CommentWithAuthor, CreatePostInput};
use snapfeed_db::entities::comment;
use snapfeed_views::render_comments;

use super::users::PostResponse;
use crate::{
    extractors::VerifiedCaller,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Newly written comment.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Record ID.
    pub id: String,
    /// Post the comment belongs to.
    pub post_id: String,
    /// Author ID.
    pub user_id: String,
    /// Comment text.
    pub content: String,
    /// RFC 3339 creation time.
    pub created_at: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(comment: comment::Model) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

async fn create(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.create_post(&identity, input).await?;
    Ok(ApiResponse::ok(post.into()))
}

async fn destroy(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.post_service.delete_post(&identity, &id).await?;
    Ok(response::ok())
}

async fn add_comment(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AddCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .add_comment(&identity, &id, input)
        .await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Comments on a post, oldest first.
async fn comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<CommentWithAuthor>>> {
    let comments = state.comment_service.get_comments(&id).await?;
    Ok(ApiResponse::ok(comments))
}

/// Comment rows rendered as HTML with relative timestamps.
async fn comments_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let comments = state.comment_service.get_comments(&id).await?;
    Ok(Html(render_comments(&comments, chrono::Utc::now())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", delete(destroy))
        .route("/{id}/comments", post(add_comment).get(comments))
        .route("/{id}/comments/view", get(comments_view))
}

//! Bookmark endpoints.

use axum::{
    Json, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use snapfeed_common::AppResult;
use snapfeed_core::BookmarkedPost;
use snapfeed_views::FeedState;

use crate::{extractors::VerifiedCaller, middleware::AppState, response::ApiResponse};

/// Toggle request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBookmarkRequest {
    /// Post to toggle.
    pub post_id: String,
}

/// Toggle result response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBookmarkResponse {
    /// Whether the post is bookmarked after the toggle.
    pub bookmarked: bool,
}

/// The caller's bookmarks, newest first. Deleted posts come back as `null`.
async fn list(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Option<BookmarkedPost>>>> {
    let posts = state.bookmark_service.get_bookmarked_posts(&identity).await?;
    Ok(ApiResponse::ok(posts))
}

async fn toggle(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
    Json(req): Json<ToggleBookmarkRequest>,
) -> AppResult<ApiResponse<ToggleBookmarkResponse>> {
    let bookmarked = state
        .bookmark_service
        .toggle_bookmark(&identity, &req.post_id)
        .await?;
    Ok(ApiResponse::ok(ToggleBookmarkResponse { bookmarked }))
}

/// The bookmarks grid rendered as HTML.
async fn view(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let posts = state.bookmark_service.get_bookmarked_posts(&identity).await?;
    Ok(Html(FeedState::from_query(Some(&posts)).to_html()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/toggle", post(toggle))
        .route("/view", get(view))
}

//! Following endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use snapfeed_common::AppResult;
use snapfeed_core::{FollowState, FollowingEntry};

use crate::{extractors::VerifiedCaller, middleware::AppState, response::ApiResponse};

/// Toggle request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFollowRequest {
    /// User to toggle.
    pub following_id: String,
}

/// Toggle result response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFollowResponse {
    /// Which way the toggle went.
    pub state: FollowState,
    /// Whether the caller follows the target afterwards.
    pub is_following: bool,
}

/// Follow the target if not yet followed, unfollow otherwise.
async fn toggle(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
    Json(req): Json<ToggleFollowRequest>,
) -> AppResult<ApiResponse<ToggleFollowResponse>> {
    let result = state
        .follow_service
        .toggle_follow(&identity, &req.following_id)
        .await?;

    Ok(ApiResponse::ok(ToggleFollowResponse {
        state: result,
        is_following: result.is_following(),
    }))
}

/// The caller's story strip: their own entry first, then everyone they follow.
async fn list(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FollowingEntry>>> {
    let entries = state.follow_service.get_following(&identity).await?;
    Ok(ApiResponse::ok(entries))
}

async fn is_following(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
    Path(target_id): Path<String>,
) -> AppResult<ApiResponse<bool>> {
    let following = state
        .follow_service
        .is_following(&identity, &target_id)
        .await?;
    Ok(ApiResponse::ok(following))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/toggle", post(toggle))
        .route("/{target_id}", get(is_following))
}

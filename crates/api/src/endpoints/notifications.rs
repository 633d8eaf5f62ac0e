//! Notification endpoints.

use axum::{Router, extract::State, routing::get};
use snapfeed_common::AppResult;
use snapfeed_core::NotificationWithSender;

use crate::{extractors::VerifiedCaller, middleware::AppState, response::ApiResponse};

async fn list(
    VerifiedCaller(identity): VerifiedCaller,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NotificationWithSender>>> {
    let notifications = state
        .notification_service
        .get_notifications(&identity)
        .await?;
    Ok(ApiResponse::ok(notifications))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list))
}

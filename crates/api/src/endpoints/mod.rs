//! API endpoints.

mod bookmarks;
mod following;
mod notifications;
mod posts;
mod users;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use snapfeed_common::AppError;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/users", users::router())
        .nest("/following", following::router())
        .nest("/posts", posts::router())
        .nest("/bookmarks", bookmarks::router())
        .nest("/notifications", notifications::router())
        .fallback(not_found)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

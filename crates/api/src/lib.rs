//! HTTP API layer for snapfeed.
//!
//! This crate exposes the social graph over JSON:
//!
//! - **Auth**: Bearer token verification into an [`Identity`](snapfeed_common::Identity)
//! - **Endpoints**: users, following, posts, comments, bookmarks, notifications
//! - **Extractors**: The caller identity and its authenticated variant
//!
//! Built on Axum 0.8.

pub mod auth;
pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use auth::TokenVerifier;
pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};

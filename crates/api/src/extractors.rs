//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use snapfeed_common::{AppError, Identity};

/// A caller that must carry a verified identity.
///
/// Rejects with `401` before the handler runs. Whether the identity maps to
/// a registered user is left to the service.
#[derive(Debug, Clone)]
pub struct VerifiedCaller(pub Identity);

impl<S> FromRequestParts<S> for VerifiedCaller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by auth middleware
        parts
            .extensions
            .get::<Identity>()
            .filter(|identity| identity.subject().is_some())
            .cloned()
            .map(Self)
            .ok_or(AppError::Unauthenticated)
    }
}

//! User service.

use snapfeed_common::{AppError, AppResult, IdGenerator, Identity};
use snapfeed_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new user.
///
/// Sent once per identity by the identity provider's sign-up hook.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    /// Unique handle.
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    /// Display name.
    #[validate(length(min = 1, max = 256))]
    pub fullname: String,

    /// Contact email.
    #[validate(email)]
    pub email: String,

    /// Profile bio.
    #[validate(length(max = 2048))]
    pub bio: Option<String>,

    /// Avatar URL.
    #[validate(length(min = 1, max = 2048))]
    pub image: String,

    /// External identity token.
    #[validate(length(min = 1, max = 256))]
    pub clerk_id: String,
}

/// Input for updating the caller's own profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    /// New avatar URL.
    #[validate(length(min = 1, max = 2048))]
    pub image: String,

    /// New display name.
    #[validate(length(min = 1, max = 256))]
    pub fullname: String,

    /// Replaces the stored bio; `None` clears it.
    #[validate(length(max = 2048))]
    pub bio: Option<String>,
}

/// Resolve the user record behind a verified identity.
///
/// Fails with [`AppError::Unauthenticated`] when the identity carries no
/// subject and with [`AppError::CallerNotFound`] when no user is registered
/// for it.
pub(crate) async fn resolve_caller(
    user_repo: &UserRepository,
    identity: &Identity,
) -> AppResult<user::Model> {
    let subject = identity.require_subject()?;
    user_repo
        .find_by_clerk_id(subject)
        .await?
        .ok_or_else(|| AppError::CallerNotFound(subject.to_string()))
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a user for an identity token.
    ///
    /// Idempotent: when a user already exists for `clerk_id` it is returned
    /// untouched and none of the input fields are applied.
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        if let Some(existing) = self.user_repo.find_by_clerk_id(&input.clerk_id).await? {
            tracing::debug!(user_id = %existing.id, "User already exists for identity, skipping");
            return Ok(existing);
        }

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username),
            fullname: Set(input.fullname),
            email: Set(input.email),
            bio: Set(input.bio),
            image: Set(input.image),
            clerk_id: Set(input.clerk_id.clone()),
            followers: Set(0),
            following: Set(0),
            posts: Set(0),
            created_at: Set(chrono::Utc::now().into()),
        };

        let Some(user) = self.user_repo.try_create(model).await? else {
            // Lost the race against a concurrent create for the same identity
            tracing::debug!("Concurrent create won for identity, returning its record");
            return self
                .user_repo
                .find_by_clerk_id(&input.clerk_id)
                .await?
                .ok_or_else(|| {
                    AppError::Database("User vanished after insert conflict".to_string())
                });
        };
        tracing::info!(user_id = %user.id, username = %user.username, "Created user");

        Ok(user)
    }

    /// Look up a user by identity token.
    pub async fn get_by_clerk_id(&self, clerk_id: &str) -> AppResult<Option<user::Model>> {
        self.user_repo.find_by_clerk_id(clerk_id).await
    }

    /// Get a user profile by ID.
    pub async fn get_profile(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Resolve the caller's user record.
    pub async fn authenticate(&self, identity: &Identity) -> AppResult<user::Model> {
        resolve_caller(&self.user_repo, identity).await
    }

    /// Update the caller's own profile.
    ///
    /// Only `image`, `fullname` and `bio` are written, and only on the record
    /// resolved from `identity`.
    pub async fn update_profile(
        &self,
        identity: &Identity,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let caller = self.authenticate(identity).await?;

        let mut active: user::ActiveModel = caller.into();
        active.image = Set(input.image);
        active.fullname = Set(input.fullname);
        active.bio = Set(input.bio);

        let user = self.user_repo.update(active).await?;
        tracing::info!(user_id = %user.id, "Updated profile");

        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, clerk_id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: "alice".to_string(),
            fullname: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            bio: None,
            image: "https://img.example.com/alice.png".to_string(),
            clerk_id: clerk_id.to_string(),
            followers: 3,
            following: 1,
            posts: 0,
            created_at: Utc::now().into(),
        }
    }

    fn create_input(clerk_id: &str) -> CreateUserInput {
        CreateUserInput {
            username: "alice".to_string(),
            fullname: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            bio: None,
            image: "https://img.example.com/alice.png".to_string(),
            clerk_id: clerk_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_existing_is_noop() {
        let existing = create_test_user("u1", "user_alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let mut input = create_input("user_alice");
        input.fullname = "Someone Else".to_string();

        let user = service.create_user(input).await.unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.fullname, "Alice");
        assert_eq!(user.followers, 3);
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_email() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(UserRepository::new(db));
        let mut input = create_input("user_alice");
        input.email = "not-an-email".to_string();

        let result = service.create_user(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_authenticate_anonymous() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(UserRepository::new(db));
        let result = service.authenticate(&Identity::anonymous()).await;

        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_authenticate_unregistered_identity() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service.authenticate(&Identity::verified("user_ghost")).await;

        assert!(matches!(result, Err(AppError::CallerNotFound(token)) if token == "user_ghost"));
    }

    #[tokio::test]
    async fn test_update_profile_requires_identity() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(UserRepository::new(db));
        let input = UpdateProfileInput {
            image: "https://img.example.com/new.png".to_string(),
            fullname: "New Name".to_string(),
            bio: Some("hello".to_string()),
        };

        let result = service.update_profile(&Identity::anonymous(), input).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}

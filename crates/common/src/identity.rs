//! Caller identity passed explicitly into every authenticated operation.

use crate::{AppError, AppResult};

/// The identity the request was made under, as verified by the identity provider.
///
/// `subject` is the provider's stable user token (the value stored as
/// `clerk_id` on the user record). An anonymous identity carries no subject.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    subject: Option<String>,
}

impl Identity {
    /// An identity verified for `subject`.
    #[must_use]
    pub fn verified(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
        }
    }

    /// A request without any verified identity.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { subject: None }
    }

    /// The verified subject, if any.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The verified subject, or [`AppError::Unauthenticated`].
    pub fn require_subject(&self) -> AppResult<&str> {
        self.subject().ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity_is_rejected() {
        let identity = Identity::anonymous();
        assert!(matches!(
            identity.require_subject(),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_verified_identity_exposes_subject() {
        let identity = Identity::verified("user_2abc");
        assert_eq!(identity.subject(), Some("user_2abc"));
        assert!(matches!(identity.require_subject(), Ok("user_2abc")));
    }
}

//! Identity token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use snapfeed_common::{AppError, AppResult, Identity, config::AuthConfig};

/// Claims read from the identity provider's session token.
#[derive(Debug, Deserialize)]
struct Claims {
    /// External identity token of the signed-in user.
    sub: String,
}

/// Verifies HS256 session tokens issued by the identity provider.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from the `auth` configuration section.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a bearer token and return the identity it was issued for.
    pub fn verify(&self, token: &str) -> AppResult<Identity> {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => {
                tracing::debug!(subject = %data.claims.sub, "Identity token verified");
                Ok(Identity::verified(data.claims.sub))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Identity token rejected");
                Err(AppError::Unauthenticated)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn expiry() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    fn verifier(issuer: Option<&str>) -> TokenVerifier {
        TokenVerifier::new(&AuthConfig {
            jwt_secret: SECRET.to_string(),
            issuer: issuer.map(ToString::to_string),
        })
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let token = sign(&json!({ "sub": "user_alice", "exp": expiry() }), SECRET);

        let identity = verifier(None).verify(&token).unwrap();
        assert_eq!(identity.subject(), Some("user_alice"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = sign(&json!({ "sub": "user_alice", "exp": expiry() }), "other");

        let result = verifier(None).verify(&token);
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let exp = chrono::Utc::now().timestamp() - 3600;
        let token = sign(&json!({ "sub": "user_alice", "exp": exp }), SECRET);

        assert!(verifier(None).verify(&token).is_err());
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let good = sign(
            &json!({ "sub": "user_alice", "exp": expiry(), "iss": "https://clerk.example.com" }),
            SECRET,
        );
        let bad = sign(
            &json!({ "sub": "user_alice", "exp": expiry(), "iss": "https://evil.example.com" }),
            SECRET,
        );

        let verifier = verifier(Some("https://clerk.example.com"));
        assert!(verifier.verify(&good).is_ok());
        assert!(verifier.verify(&bad).is_err());
    }
}

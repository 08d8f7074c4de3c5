//! The session verification seam used by the page handlers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use clerk_rs::validators::jwks::MemoryCacheJwksProvider;

use oms_core::identity::AuthIdentity;

use crate::error::AuthError;
use crate::jwks;

/// Turns a raw session token into the caller's identity.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError` when the token is invalid or expired.
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError>;
}

/// Verifier backed by Clerk's JWKS endpoint.
pub struct ClerkVerifier {
    provider: Arc<MemoryCacheJwksProvider>,
}

impl ClerkVerifier {
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` for an empty secret key.
    pub fn new(secret_key: &str) -> Result<Self, AuthError> {
        if secret_key.trim().is_empty() {
            return Err(AuthError::NotConfigured);
        }
        Ok(Self {
            provider: jwks::provider(secret_key),
        })
    }
}

#[async_trait]
impl SessionVerifier for ClerkVerifier {
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        let claims = jwks::validate(token, Arc::clone(&self.provider)).await?;
        if claims.is_expired(Utc::now()) {
            return Err(AuthError::SessionExpired);
        }
        tracing::debug!(user_id = %claims.user_id, "session verified");
        Ok(claims.to_identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            ClerkVerifier::new("  "),
            Err(AuthError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn malformed_token_fails_validation() {
        let verifier = ClerkVerifier::new("sk_test_placeholder").unwrap();
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::JwksValidation(_)));
    }
}

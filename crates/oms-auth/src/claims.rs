use chrono::{DateTime, Utc};

use oms_core::identity::AuthIdentity;

/// Validated Clerk session claims.
///
/// Wraps the fields of `clerk-rs::ClerkJwt` the OMS reads. Produced by JWKS
/// validation, consumed by the session gate.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    /// Clerk user ID (`sub` claim); the `profiles.id` key.
    pub user_id: String,
    /// Email from a custom session claim, when the session template adds one.
    pub email: Option<String>,
    /// Token expiration time (from `exp` claim).
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

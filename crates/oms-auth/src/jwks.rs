use std::sync::Arc;

use clerk_rs::ClerkConfiguration;
use clerk_rs::clerk::Clerk;
use clerk_rs::validators::authorizer::validate_jwt;
use clerk_rs::validators::jwks::MemoryCacheJwksProvider;

use crate::claims::SessionClaims;
use crate::error::AuthError;

/// Build a JWKS provider bound to one Clerk secret key.
///
/// The `MemoryCacheJwksProvider` caches Clerk's public keys internally, so a
/// server builds one provider at startup and shares it across requests.
#[must_use]
pub fn provider(secret_key: &str) -> Arc<MemoryCacheJwksProvider> {
    let config = ClerkConfiguration::new(None, None, Some(secret_key.to_string()), None);
    Arc::new(MemoryCacheJwksProvider::new(Clerk::new(config)))
}

/// Validate a Clerk session JWT via JWKS and extract the OMS claims.
///
/// # Errors
///
/// Returns `AuthError::JwksValidation` if the token is invalid, expired,
/// or the JWKS endpoint is unreachable.
pub async fn validate(
    jwt: &str,
    provider: Arc<MemoryCacheJwksProvider>,
) -> Result<SessionClaims, AuthError> {
    let clerk_jwt = validate_jwt(jwt, provider)
        .await
        .map_err(|e| AuthError::JwksValidation(e.to_string()))?;

    let expires_at = chrono::DateTime::from_timestamp(i64::from(clerk_jwt.exp), 0)
        .ok_or_else(|| AuthError::JwksValidation("invalid exp timestamp".into()))?;

    let claim = |key: &str| {
        clerk_jwt
            .other
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
    };
    Ok(SessionClaims {
        user_id: clerk_jwt.sub.clone(),
        email: claim("email"),
        expires_at,
    })
}

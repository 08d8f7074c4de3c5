use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no session token on the request")]
    MissingSession,

    #[error("session expired")]
    SessionExpired,

    #[error("JWKS validation failed: {0}")]
    JwksValidation(String),

    #[error("auth provider is not configured")]
    NotConfigured,
}

//! Clerk session-verification configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClerkConfig {
    /// Clerk secret key; used to fetch the JWKS that signs session tokens.
    #[serde(default)]
    pub secret_key: String,

    /// Clerk publishable key, handed to the sign-in frontend.
    #[serde(default)]
    pub publishable_key: String,
}

impl ClerkConfig {
    /// Session tokens can only be verified with a secret key.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!ClerkConfig::default().is_configured());
    }

    #[test]
    fn configured_with_secret_only() {
        let config = ClerkConfig {
            secret_key: "sk_test_456".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}

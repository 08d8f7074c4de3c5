use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `oms-auth` from a validated session token, consumed by the
/// page handlers in `oms-server` to look up the caller's `profiles` row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Auth provider user ID (JWT `sub` claim); also the `profiles.id` key.
    pub user_id: String,
    /// Email address carried in the session, if the provider includes it.
    pub email: Option<String>,
}

//! # oms-auth
//!
//! Session authentication for the OMS web server.
//!
//! Sessions are issued and refreshed by Clerk. This crate only reads the
//! session token off a request (`__session` cookie or bearer header),
//! validates it against Clerk's JWKS (`clerk-rs`), and hands back an
//! [`oms_core::identity::AuthIdentity`]. Page handlers depend on the
//! [`SessionVerifier`] trait so tests can swap in a fake.

pub mod claims;
pub mod error;
pub mod jwks;
pub mod session;
pub mod verifier;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use session::{SESSION_COOKIE, session_token};
pub use verifier::{ClerkVerifier, SessionVerifier};

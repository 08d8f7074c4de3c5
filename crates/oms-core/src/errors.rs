//! Cross-cutting error types for the OMS.
//!
//! This module defines errors that can originate from any crate in the system.
//! Storage errors (`DatabaseError`) and auth errors (`AuthError`) live in their
//! respective crates and converge in `oms-server`'s `PageError`.

use thiserror::Error;

/// Errors that can be raised by any OMS crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (form input, enum value, JSON shape).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The acting user's role does not allow the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

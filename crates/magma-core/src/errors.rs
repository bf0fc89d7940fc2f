//! Cross-cutting error types for Magma.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ScaffoldError`) are defined
//! in their respective crates. `CoreError` covers failures that are decided
//! without touching storage: validation of incoming documents and lookups of
//! caller-supplied handles.

use thiserror::Error;

/// Errors that can be raised by any Magma crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a `Validation` error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

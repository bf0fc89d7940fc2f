use thiserror::Error;

/// Errors from storage, repositories, and the write half of scaffolding.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A query returned a value that does not fit its column type.
    #[error("query failed: {0}")]
    Query(String),

    /// Opening the database or applying the embedded schema failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// The addressed row does not exist.
    #[error("no such row")]
    NoResult,

    /// Stored or supplied data breaks an invariant (ownership, dates, counts).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libsql: {0}")]
    LibSql(#[from] libsql::Error),

    /// A JSON column could not be encoded or decoded.
    #[error("json column: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

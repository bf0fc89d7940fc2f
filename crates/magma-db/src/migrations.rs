//! Embedded schema, applied on every open. Statements are `IF NOT EXISTS`,
//! so reopening an existing database is a no-op.

use crate::MagmaDb;
use crate::error::DatabaseError;

/// Organizations, projects, the document forest and everything hanging off it,
/// the SCF catalog, and the audit trail.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl MagmaDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}

//! Service layer wrapping the database handle and scaffolding settings.
//!
//! `MagmaService` wraps `MagmaDb` (raw database access) and the
//! `ScaffoldConfig` the engine reads. All repo methods are implemented as
//! `impl MagmaService` blocks.

use magma_config::ScaffoldConfig;

use crate::MagmaDb;
use crate::error::DatabaseError;

/// Entry point for every read, mutation, and scaffolding run.
///
/// Single-row mutations append an audit entry on the same connection.
/// Multi-row operations (scaffolding, seeding) run in one transaction and
/// append their audit entry inside it.
pub struct MagmaService {
    db: MagmaDb,
    scaffold: ScaffoldConfig,
}

impl MagmaService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `scaffold` - Settings applied to every scaffolding run.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, scaffold: ScaffoldConfig) -> Result<Self, DatabaseError> {
        let db = MagmaDb::open_local(db_path).await?;
        Ok(Self::from_db(db, scaffold))
    }

    /// Create from an existing `MagmaDb`.
    #[must_use]
    pub const fn from_db(db: MagmaDb, scaffold: ScaffoldConfig) -> Self {
        Self { db, scaffold }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &MagmaDb {
        &self.db
    }

    /// Settings applied to scaffolding runs.
    #[must_use]
    pub const fn scaffold_config(&self) -> &ScaffoldConfig {
        &self.scaffold
    }
}

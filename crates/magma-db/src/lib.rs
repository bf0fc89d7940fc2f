//! # magma-db
//!
//! libSQL storage for Magma and the project scaffolding engine.
//!
//! Holds all relational state: organizations, projects, the document forest,
//! document relations, evidence requests, auditors, collections, evidence,
//! the SCF risk/threat catalog, and the audit trail. Scaffolding a project
//! from an SCF config writes all of it in a single transaction.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod scaffold;
pub mod seed;
pub mod service;

#[cfg(test)]
mod test_support;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};

/// How long a connection waits on another writer before failing with `SQLITE_BUSY`.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

const MEMORY_PATH: &str = ":memory:";

static MEMORY_DATABASES: AtomicU64 = AtomicU64::new(0);

/// Central database handle.
///
/// Wraps a libSQL database and a shared connection for single-statement
/// reads and writes. Multi-row writes go through [`MagmaDb::begin_write`],
/// which opens a dedicated connection per transaction so other callers
/// never see (or join) a write that has not committed.
pub struct MagmaDb {
    db: libsql::Database,
    conn: libsql::Connection,
    file_backed: bool,
}

impl MagmaDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// `":memory:"` opens a private shared-cache database, so every
    /// connection of this handle sees the same data. File databases run in
    /// WAL mode. Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let file_backed = path != MEMORY_PATH;
        let target = if file_backed {
            path.to_string()
        } else {
            format!(
                "file:magma-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                MEMORY_DATABASES.fetch_add(1, Ordering::Relaxed)
            )
        };
        let db = Builder::new_local(target).build().await?;
        let conn = configure(db.connect()?).await?;
        if file_backed {
            conn.execute_batch("PRAGMA journal_mode = WAL;")
                .await
                .map_err(|e| DatabaseError::Migration(format!("PRAGMA journal_mode: {e}")))?;
        }

        let magma_db = Self {
            db,
            conn,
            file_backed,
        };
        magma_db.run_migrations().await?;
        Ok(magma_db)
    }

    /// Access the shared libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_file_backed(&self) -> bool {
        self.file_backed
    }

    /// Open a new connection with foreign keys and the busy timeout set.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be opened.
    pub async fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        configure(self.db.connect()?).await
    }

    /// Begin an `IMMEDIATE` transaction on a fresh connection.
    ///
    /// The write lock is taken up front, so concurrent writers queue on
    /// [`BUSY_TIMEOUT`] instead of failing on lock upgrade. Nothing written
    /// through the transaction is visible on [`MagmaDb::conn`] until commit.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be opened or the
    /// write lock is not granted within [`BUSY_TIMEOUT`].
    pub async fn begin_write(&self) -> Result<libsql::Transaction, DatabaseError> {
        let conn = self.connect().await?;
        Ok(conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Generate a prefixed ID on the handle's connection, e.g. `"doc-3f9a1c0b7e2d4a55"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id_on(&self.conn, prefix).await
    }
}

/// Per-connection settings. `SQLite` does not persist either one.
async fn configure(conn: libsql::Connection) -> Result<libsql::Connection, DatabaseError> {
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

/// Generate a prefixed ID on `conn`.
///
/// Takes the connection explicitly so IDs can be drawn from inside an open
/// transaction. `randomblob(8)` gives 16 hex characters after the prefix.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id_on(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query("SELECT ?1 || '-' || lower(hex(randomblob(8)))", [prefix])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

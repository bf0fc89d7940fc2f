//! Repository modules for all Magma entities.
//!
//! Each module adds read and single-row mutation methods to `MagmaService`
//! via `impl MagmaService` blocks. Inserts that take part in multi-row
//! transactions are free functions over a `libsql::Connection` so they run
//! unchanged on an open `libsql::Transaction`.

pub mod audit;
pub mod auditor;
pub mod catalog;
pub mod collection;
pub mod document;
pub mod evidence;
pub mod evidence_request;
pub mod organization;
pub mod project;
pub mod relation;
pub mod template;

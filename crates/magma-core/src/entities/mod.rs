//! Entity structs for all Magma domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `crates/magma-db/migrations/001_initial.sql`). All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`.

mod audit;
mod auditor;
mod catalog;
mod collection;
mod document;
mod evidence;
mod evidence_request;
mod organization;
mod project;
mod relation;
mod template;

pub use audit::AuditEntry;
pub use auditor::Auditor;
pub use catalog::{ScfRisk, ScfThreat};
pub use collection::Collection;
pub use document::Document;
pub use evidence::Evidence;
pub use evidence_request::EvidenceRequest;
pub use organization::Organization;
pub use project::Project;
pub use relation::DocumentRelation;
pub use template::DocumentationTemplate;

pub mod catalog;
pub mod org;
pub mod project;

pub use catalog::{CatalogCommands, CatalogImportArgs};
pub use org::OrgCommands;
pub use project::ProjectCommands;

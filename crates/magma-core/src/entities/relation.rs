use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RelationType;

/// A directed edge between two documents of the same project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentRelation {
    pub id: String,
    pub organization_id: String,
    pub project_id: String,
    pub document_id: String,
    pub related_document_id: String,
    pub relation_type: RelationType,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::payloads::DocumentPage;

/// Legacy nested page tree persisted alongside the document forest.
///
/// Kept for consumers that predate the `documents` table; new readers use
/// the document tree instead.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentationTemplate {
    pub id: String,
    pub organization_id: String,
    pub project_id: String,
    pub pages: Vec<DocumentPage>,
    pub created_at: DateTime<Utc>,
}

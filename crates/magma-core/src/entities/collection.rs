use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A synthesized grouping of sources (process, table, diagram).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub organization_id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    /// `process`, `table`, `diagram`.
    pub collection_type: String,
    pub agent_type: String,
    pub agent_reasoning: String,
    pub agent_prompt: String,
    pub agent_context: String,
    pub content: serde_json::Value,
    /// Fingerprint of `content`; empty if it could not be hashed.
    pub content_hash: String,
    pub sources: Vec<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

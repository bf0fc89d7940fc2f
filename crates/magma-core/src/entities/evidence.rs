use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A collected piece of evidence attached to one document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Evidence {
    pub id: String,
    pub organization_id: String,
    pub project_id: String,
    pub document_id: String,
    pub name: String,
    pub description: String,
    /// `temporary`, `static`, `dynamic`.
    pub evidence_type: String,
    pub source_id: String,
    pub source_type: String,
    pub source_method: String,
    pub source_query: String,
    pub date_collected: DateTime<Utc>,
    pub date_expires: Option<DateTime<Utc>>,
    pub context: String,
    /// `text`, `config`, `artifact`, `collection`.
    pub value_type: String,
    pub value: serde_json::Value,
    /// Fingerprint of `value`; empty if it could not be hashed.
    pub content_hash: String,
    pub group_name: String,
    pub tags: Vec<String>,
    pub collection_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EvidenceRequestStatus, Priority, RequiredEvidenceType};
use crate::payloads::SuggestedSource;

/// A request for an artifact proving a control is implemented.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvidenceRequest {
    pub id: String,
    pub organization_id: String,
    pub project_id: String,
    /// Owning document.
    pub document_id: String,
    pub title: String,
    pub description: String,
    pub required_type: RequiredEvidenceType,
    pub suggested_sources: Vec<SuggestedSource>,
    pub acceptance_criteria: String,
    pub assigned_to: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub status: EvidenceRequestStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

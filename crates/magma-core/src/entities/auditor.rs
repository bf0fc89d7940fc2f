use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::payloads::AuditorInstructions;

/// An instruction-driven audit check definition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Auditor {
    pub id: String,
    pub organization_id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    /// Cron expression. `None` means on-demand only.
    pub schedule: Option<String>,
    pub is_active: bool,
    pub instructions: AuditorInstructions,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DocumentStatus, PageKind};

/// A node in a project's page forest.
///
/// `parent_id = None` marks a root (Controls Overview, Risks, Threats).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub organization_id: String,
    pub project_id: String,
    /// Semantic tag such as `control-IAC-01`; see [`PageKind::from_template_page_id`].
    pub template_page_id: String,
    pub title: String,
    /// Markdown body.
    pub content: String,
    pub parent_id: Option<String>,
    /// Position among siblings.
    pub sort_order: i64,
    pub status: DocumentStatus,
    pub version: i64,
    pub scf_control_id: Option<String>,
    /// Sorted framework keys covered by the control (e.g. `["nist_csf", "soc2"]`).
    pub scf_framework_keys: Option<Vec<String>>,
    /// Set on control pages only.
    pub relevance_score: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    #[must_use]
    pub fn kind(&self) -> PageKind {
        PageKind::from_template_page_id(&self.template_page_id)
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

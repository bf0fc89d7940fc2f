//! Status enums, page kinds, relation tags, and audit actions for Magma.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! unless the stored value predates that convention (project status uses
//! kebab-case). `as_str()` returns exactly what is written to SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a compliance project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Initializing,
    Active,
    UpToDate,
    OutOfDate,
    AuditReady,
    Completed,
    OnHold,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Active => "active",
            Self::UpToDate => "up-to-date",
            Self::OutOfDate => "out-of-date",
            Self::AuditReady => "audit-ready",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentStatus
// ---------------------------------------------------------------------------

/// Editing status of a document page.
///
/// ```text
/// draft → in_progress → needs_review → complete
///                     ← needs_review
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    InProgress,
    NeedsReview,
    Complete,
}

impl DocumentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::NeedsReview => "needs_review",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PageKind
// ---------------------------------------------------------------------------

/// Semantic kind of a document, inferred from its template page tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Overview,
    Domain,
    Control,
    Risk,
    Threat,
    Other,
}

impl PageKind {
    /// Infer the page kind from a template page tag.
    ///
    /// Overview tags end in `-overview` (`controls-overview`, `risks-overview`,
    /// `threats-overview`); the rest are keyed by prefix.
    #[must_use]
    pub fn from_template_page_id(tag: &str) -> Self {
        if tag.ends_with("-overview") {
            Self::Overview
        } else if tag.starts_with("domain-") {
            Self::Domain
        } else if tag.starts_with("control-") {
            Self::Control
        } else if tag.starts_with("risk-") {
            Self::Risk
        } else if tag.starts_with("threat-") {
            Self::Threat
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Domain => "domain",
            Self::Control => "control",
            Self::Risk => "risk",
            Self::Threat => "threat",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RelationType
// ---------------------------------------------------------------------------

/// Tag on a directed document relation edge.
///
/// Control links are always written in pairs; `reverse()` gives the tag of
/// the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    RiskToControl,
    ControlToRisk,
    ThreatToControl,
    ControlToThreat,
}

impl RelationType {
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::RiskToControl => Self::ControlToRisk,
            Self::ControlToRisk => Self::RiskToControl,
            Self::ThreatToControl => Self::ControlToThreat,
            Self::ControlToThreat => Self::ThreatToControl,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskToControl => "risk_to_control",
            Self::ControlToRisk => "control_to_risk",
            Self::ThreatToControl => "threat_to_control",
            Self::ControlToThreat => "control_to_threat",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of an evidence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Priority for a generated evidence request given the control's priority flag.
    #[must_use]
    pub const fn from_control_flag(priority: bool) -> Self {
        if priority { Self::High } else { Self::Medium }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvidenceRequestStatus
// ---------------------------------------------------------------------------

/// Status of an evidence request.
///
/// ```text
/// pending → in_progress → fulfilled
///                       → rejected
///         → cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceRequestStatus {
    Pending,
    InProgress,
    Fulfilled,
    Rejected,
    Cancelled,
}

impl EvidenceRequestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EvidenceRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RequiredEvidenceType
// ---------------------------------------------------------------------------

/// Kind of evidence an evidence request will accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequiredEvidenceType {
    Text,
    Config,
    Artifact,
    Collection,
    Any,
}

impl RequiredEvidenceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Config => "config",
            Self::Artifact => "artifact",
            Self::Collection => "collection",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for RequiredEvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Action recorded in an audit trail entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Scaffolded,
    Seeded,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Scaffolded => "scaffolded",
            Self::Seeded => "seeded",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Every persisted entity kind. Used by the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Organization,
    Project,
    Document,
    DocumentRelation,
    EvidenceRequest,
    Auditor,
    DocumentationTemplate,
    Collection,
    Evidence,
    ScfRisk,
    ScfThreat,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Project => "project",
            Self::Document => "document",
            Self::DocumentRelation => "document_relation",
            Self::EvidenceRequest => "evidence_request",
            Self::Auditor => "auditor",
            Self::DocumentationTemplate => "documentation_template",
            Self::Collection => "collection",
            Self::Evidence => "evidence",
            Self::ScfRisk => "scf_risk",
            Self::ScfThreat => "scf_threat",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

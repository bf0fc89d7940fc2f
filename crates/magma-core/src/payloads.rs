//! Typed JSON payloads stored in TEXT columns.
//!
//! Auditor instructions, evidence-request suggested sources, and the legacy
//! page tree are written as JSON. They are built through these types so the
//! shape is fixed where the payload is constructed, not at every read site.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Score an auditor needs to pass when no other threshold is configured.
pub const DEFAULT_PASSING_SCORE: u32 = 80;

/// Weight given to every generated requirement.
pub const REQUIREMENT_WEIGHT: u32 = 100;

const SUCCESS_CRITERIA: [&str; 2] = [
    "Controls are implemented as described and operating effectively.",
    "Evidence provided is complete, relevant, and recent.",
];

const FAILURE_CRITERIA: [&str; 2] = [
    "Key controls are missing or not fully implemented.",
    "Evidence is missing, outdated, or does not cover the scope.",
];

const EVALUATION_INSTRUCTIONS: &str = "Review this control and its associated evidence to determine if the assessment objectives are met.";

// ---------------------------------------------------------------------------
// Suggested sources
// ---------------------------------------------------------------------------

/// Where an evidence request's artifact is expected to come from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SuggestedSource {
    /// Provenance back to an SCF evidence catalog item.
    Scf {
        evidence_id: String,
        area_of_focus: String,
        artifact: String,
        control_ids: Vec<String>,
    },
    /// A free-form source hint (e.g. `"github"`, `"hr_system"`).
    Named { name: String },
}

// ---------------------------------------------------------------------------
// Auditor instructions
// ---------------------------------------------------------------------------

/// One checkable requirement inside an auditor's instructions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditRequirement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub context: String,
    pub success_criteria: Vec<String>,
    pub failure_criteria: Vec<String>,
    pub weight: u32,
}

impl AuditRequirement {
    /// Requirement for one assessment objective, with the stock criteria.
    #[must_use]
    pub fn for_objective(objective_id: &str, statement: &str, context: &str) -> Self {
        Self {
            id: format!("req-{objective_id}"),
            title: statement.to_string(),
            description: format!("Assessment objective {objective_id}: {statement}"),
            context: context.to_string(),
            success_criteria: SUCCESS_CRITERIA.iter().map(ToString::to_string).collect(),
            failure_criteria: FAILURE_CRITERIA.iter().map(ToString::to_string).collect(),
            weight: REQUIREMENT_WEIGHT,
        }
    }
}

/// The document an auditor is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditTarget {
    pub control_id: String,
    pub document_id: String,
}

/// Structured instruction payload of an auditor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditorInstructions {
    pub requirements: Vec<AuditRequirement>,
    pub passing_score: u32,
    pub evaluation_instructions: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<AuditTarget>,
}

impl AuditorInstructions {
    /// Instructions auditing a single control document.
    ///
    /// Returns `None` when `requirements` is empty: an auditor with nothing
    /// to check is never built.
    #[must_use]
    pub fn for_control(
        requirements: Vec<AuditRequirement>,
        passing_score: u32,
        target: AuditTarget,
    ) -> Option<Self> {
        if requirements.is_empty() {
            return None;
        }
        Some(Self {
            requirements,
            passing_score,
            evaluation_instructions: EVALUATION_INSTRUCTIONS.to_string(),
            targets: vec![target],
        })
    }
}

// ---------------------------------------------------------------------------
// Legacy page tree
// ---------------------------------------------------------------------------

/// A page in the legacy documentation template tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentPage {
    pub id: String,
    pub title: String,
    pub content: String,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentPage>,
}

impl DocumentPage {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            order,
            children: Vec::new(),
        }
    }
}

/// Wire shape of the persisted template: `{"pages": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PagesPayload {
    pub pages: Vec<DocumentPage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn suggested_source_is_tagged_by_type() {
        let src = SuggestedSource::Scf {
            evidence_id: "E-GOV-01".into(),
            area_of_focus: "Governance".into(),
            artifact: "Charter".into(),
            control_ids: vec!["GOV-01".into()],
        };
        let json = serde_json::to_value(&src).unwrap();
        assert_eq!(json["type"], "scf");
        assert_eq!(json["control_ids"][0], "GOV-01");

        let named: SuggestedSource = serde_json::from_str(r#"{"type":"named","name":"github"}"#).unwrap();
        assert_eq!(named, SuggestedSource::Named { name: "github".into() });
    }

    #[test]
    fn requirement_for_objective_uses_stock_criteria() {
        let req = AuditRequirement::for_objective("AO-1", "MFA is enforced", "Control: IAC-06");
        assert_eq!(req.id, "req-AO-1");
        assert_eq!(req.description, "Assessment objective AO-1: MFA is enforced");
        assert_eq!(req.weight, 100);
        assert_eq!(req.success_criteria.len(), 2);
        assert_eq!(req.failure_criteria.len(), 2);
    }

    #[test]
    fn instructions_without_requirements_are_not_built() {
        let target = AuditTarget {
            control_id: "IAC-06".into(),
            document_id: "doc-1".into(),
        };
        assert!(AuditorInstructions::for_control(Vec::new(), 80, target).is_none());
    }

    #[test]
    fn instructions_target_exactly_one_document() {
        let req = AuditRequirement::for_objective("AO-1", "s", "c");
        let target = AuditTarget {
            control_id: "IAC-06".into(),
            document_id: "doc-1".into(),
        };
        let ins = AuditorInstructions::for_control(vec![req], 80, target.clone()).unwrap();
        assert_eq!(ins.targets, vec![target]);
        assert_eq!(ins.passing_score, 80);
    }

    #[test]
    fn leaf_pages_omit_children() {
        let page = DocumentPage::new("control-A", "A", "", 1);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("children").is_none());
    }
}

//! Bundle format for seeding a project with default documentation.
//!
//! A bundle lists documents, each carrying the collections, evidence, and
//! evidence requests that should be created under it.

use serde::{Deserialize, Serialize};

use crate::enums::{DocumentStatus, EvidenceRequestStatus, Priority, RequiredEvidenceType};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocumentationBundle {
    /// Template page tag applied to every seeded document.
    pub template_page_id: String,
    pub documents: Vec<SeedDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedDocument {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_document_status")]
    pub status: DocumentStatus,
    #[serde(default)]
    pub evidence: Vec<SeedEvidence>,
    #[serde(default)]
    pub collections: Vec<SeedCollection>,
    #[serde(default)]
    pub evidence_requests: Vec<SeedEvidenceRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeedCollection {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub collection_type: String,
    pub agent_type: String,
    pub agent_reasoning: String,
    pub agent_prompt: String,
    pub agent_context: String,
    pub content: serde_json::Value,
    pub sources: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeedEvidence {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub evidence_type: String,
    pub source_id: String,
    pub source_type: String,
    pub source_method: String,
    pub source_query: String,
    /// RFC 3339.
    pub date_collected: String,
    /// RFC 3339. Unparseable values are dropped.
    pub date_expires: Option<String>,
    pub context: String,
    pub value_type: String,
    pub value: serde_json::Value,
    pub group: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedEvidenceRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_required_type")]
    pub required_type: RequiredEvidenceType,
    #[serde(default)]
    pub suggested_sources: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    /// RFC 3339. Unparseable values are dropped.
    #[serde(default)]
    pub due_date: String,
    #[serde(default = "default_request_status")]
    pub status: EvidenceRequestStatus,
    #[serde(default)]
    pub created_by: String,
}

const fn default_document_status() -> DocumentStatus {
    DocumentStatus::Draft
}

const fn default_required_type() -> RequiredEvidenceType {
    RequiredEvidenceType::Any
}

const fn default_priority() -> Priority {
    Priority::Medium
}

const fn default_request_status() -> EvidenceRequestStatus {
    EvidenceRequestStatus::Pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_defaults_fill_missing_fields() {
        let bundle: DocumentationBundle = serde_json::from_str(
            r#"{
                "template_page_id": "soc2",
                "documents": [{
                    "title": "Access Policy",
                    "evidence_requests": [{"title": "Upload policy"}],
                    "collections": [{"name": "Onboarding", "type": "process", "content": {"steps": []}}]
                }]
            }"#,
        )
        .unwrap();
        let doc = &bundle.documents[0];
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.evidence_requests[0].priority, Priority::Medium);
        assert_eq!(doc.evidence_requests[0].status, EvidenceRequestStatus::Pending);
        assert_eq!(doc.collections[0].collection_type, "process");
    }
}

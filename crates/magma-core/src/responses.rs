//! Response types returned as JSON by the scaffolder and the `magma` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Document, Project};

/// Counts of what a scaffolding run committed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScaffoldStats {
    /// Selected controls in the config.
    pub controls: u32,
    /// Every document created: overview, domains, controls, risks, threats.
    pub documents: u32,
    pub evidence_requests: u32,
    pub auditors: u32,
}

/// Response from scaffolding a project out of an SCF config.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScaffoldResponse {
    pub project: Project,
    pub stats: ScaffoldStats,
}

/// Counts of what a default-documentation seeding run committed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SeedStats {
    pub documents: u32,
    pub collections: u32,
    pub evidence: u32,
    pub evidence_requests: u32,
}

/// A document with its children, as rendered by `magma tree`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentNode {
    #[serde(flatten)]
    pub document: Document,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Number of documents in this subtree, including this one.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

//! Tolerant lookup of catalog items embedded in a config document.
//!
//! Controls reference assessment objectives and evidence items by ID. A
//! reference that does not resolve is not an error: the item may have been
//! retired from the catalog since the config was generated. Resolution
//! returns the hits and the misses separately so callers can skip and report.

use std::collections::{HashMap, HashSet};

use super::config::{AssessmentObjective, EvidenceItem, ScfConfig, ScfControl};

/// Outcome of resolving a list of references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a, T> {
    /// Resolved items, in reference order, each at most once.
    pub found: Vec<&'a T>,
    /// References with no catalog entry, in reference order, each at most once.
    pub missing: Vec<&'a str>,
}

impl<T> Resolved<'_, T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

/// Read-only maps from catalog item ID to catalog item.
#[derive(Debug, Clone, Default)]
pub struct CatalogLookup<'a> {
    ao_by_id: HashMap<&'a str, &'a AssessmentObjective>,
    evidence_by_id: HashMap<&'a str, &'a EvidenceItem>,
}

impl<'a> CatalogLookup<'a> {
    /// Index the config's assessment objectives and evidence items.
    ///
    /// Items with an empty `object_id` are skipped. On duplicate IDs the last
    /// item wins.
    #[must_use]
    pub fn resolve(config: &'a ScfConfig) -> Self {
        let ao_by_id = config
            .assessment_objectives
            .items
            .iter()
            .filter(|ao| !ao.object_id.is_empty())
            .map(|ao| (ao.object_id.as_str(), ao))
            .collect();
        let evidence_by_id = config
            .evidence_requests
            .items
            .iter()
            .filter(|er| !er.object_id.is_empty())
            .map(|er| (er.object_id.as_str(), er))
            .collect();
        Self {
            ao_by_id,
            evidence_by_id,
        }
    }

    #[must_use]
    pub fn objective(&self, id: &str) -> Option<&'a AssessmentObjective> {
        self.ao_by_id.get(id).copied()
    }

    #[must_use]
    pub fn evidence(&self, id: &str) -> Option<&'a EvidenceItem> {
        self.evidence_by_id.get(id).copied()
    }

    #[must_use]
    pub fn objective_count(&self) -> usize {
        self.ao_by_id.len()
    }

    #[must_use]
    pub fn evidence_count(&self) -> usize {
        self.evidence_by_id.len()
    }

    /// Assessment objectives referenced by `control`.
    #[must_use]
    pub fn objectives_for(&self, control: &'a ScfControl) -> Resolved<'a, AssessmentObjective> {
        resolve_ids(&control.assessment_objective_ids, |id| self.objective(id))
    }

    /// Evidence items referenced by `control`.
    #[must_use]
    pub fn evidence_for(&self, control: &'a ScfControl) -> Resolved<'a, EvidenceItem> {
        resolve_ids(&control.evidence_request_ids, |id| self.evidence(id))
    }
}

fn resolve_ids<'a, T>(
    ids: &'a [String],
    lookup: impl Fn(&str) -> Option<&'a T>,
) -> Resolved<'a, T> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for id in ids {
        if id.is_empty() || !seen.insert(id.as_str()) {
            continue;
        }
        match lookup(id) {
            Some(item) => found.push(item),
            None => missing.push(id.as_str()),
        }
    }
    Resolved { found, missing }
}

/// Distinct non-empty IDs in first-seen order.
#[must_use]
pub fn unique_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .map(String::as_str)
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .collect()
}

//! The `scf_config.v1` document a project is scaffolded from.
//!
//! Every field is optional on the wire; missing and `null` fields take their
//! zero value.
//! Validation happens once, up front, in [`ScfConfig::validate`] and
//! [`ScfConfig::selected_controls`].

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// The only config version the scaffolder accepts.
pub const SUPPORTED_VERSION: &str = "scf_config.v1";

/// Domain assigned to controls whose domain is blank.
pub const UNCATEGORIZED_DOMAIN: &str = "Uncategorized";

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ScfConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub generated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_name: String,
    /// If non-empty, must match the organization the project is created in.
    #[serde(deserialize_with = "null_as_default")]
    pub organization_id: String,
    /// Explicit project description. Derived from the selection when blank.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub controls: Vec<ScfControl>,
    #[serde(deserialize_with = "null_as_default")]
    pub timeline: Timeline,
    #[serde(deserialize_with = "null_as_default")]
    pub assessment_objectives: AssessmentObjectiveSection,
    #[serde(deserialize_with = "null_as_default")]
    pub evidence_requests: EvidenceRequestSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ScfControl {
    #[serde(deserialize_with = "null_as_default")]
    pub object_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cadence: String,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
    /// Framework key → covered.
    #[serde(deserialize_with = "null_as_default")]
    pub coverage: BTreeMap<String, bool>,
    /// Core level key → included.
    #[serde(deserialize_with = "null_as_default")]
    pub core: BTreeMap<String, bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub selected: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub control_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub risk_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub threat_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub assessment_objective_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub evidence_request_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct Timeline {
    #[serde(deserialize_with = "null_as_default")]
    pub windows: Vec<TimelineWindow>,
    #[serde(deserialize_with = "null_as_default")]
    pub max_months: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_unique_controls: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct TimelineWindow {
    #[serde(deserialize_with = "null_as_default")]
    pub goal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_month: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub end_month: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct AssessmentObjectiveSection {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<AssessmentObjective>,
    #[serde(deserialize_with = "null_as_default")]
    pub controls_by_ao_id: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct AssessmentObjective {
    #[serde(deserialize_with = "null_as_default")]
    pub object_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub control_mappings: String,
    #[serde(deserialize_with = "null_as_default")]
    pub statement: String,
    #[serde(deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_scf_baseline: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct EvidenceRequestSection {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<EvidenceItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub controls_by_evidence_id: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct EvidenceItem {
    #[serde(deserialize_with = "null_as_default")]
    pub object_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub area_of_focus: String,
    #[serde(deserialize_with = "null_as_default")]
    pub artifact: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

impl ScfConfig {
    /// Check the document-level invariants that need no storage access.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an unsupported version, a blank
    /// project name, or an empty control list.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.version != SUPPORTED_VERSION {
            return Err(CoreError::validation(format!(
                "unsupported config version '{}' (expected '{SUPPORTED_VERSION}')",
                self.version
            )));
        }
        if self.project_name.trim().is_empty() {
            return Err(CoreError::validation("project_name is required"));
        }
        if self.controls.is_empty() {
            return Err(CoreError::validation("controls are required"));
        }
        Ok(())
    }

    /// Check that the config, if it names an organization, names `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on mismatch.
    pub fn check_organization(&self, organization_id: &str) -> Result<(), CoreError> {
        if !self.organization_id.is_empty() && self.organization_id != organization_id {
            return Err(CoreError::validation(format!(
                "organization_id '{}' in config does not match '{organization_id}'",
                self.organization_id
            )));
        }
        Ok(())
    }

    /// Controls marked `selected`, in config order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if no control is selected.
    pub fn selected_controls(&self) -> Result<Vec<&ScfControl>, CoreError> {
        let selected: Vec<&ScfControl> = self.controls.iter().filter(|c| c.selected).collect();
        if selected.is_empty() {
            return Err(CoreError::validation("no selected controls in config"));
        }
        Ok(selected)
    }
}

impl ScfControl {
    /// Trimmed domain name, or [`UNCATEGORIZED_DOMAIN`] when blank.
    #[must_use]
    pub fn domain_name(&self) -> &str {
        let trimmed = self.domain.trim();
        if trimmed.is_empty() {
            UNCATEGORIZED_DOMAIN
        } else {
            trimmed
        }
    }

    /// Framework keys flagged true, sorted.
    #[must_use]
    pub fn coverage_keys(&self) -> Vec<String> {
        true_keys(&self.coverage)
    }

    /// Core-level keys flagged true, sorted.
    #[must_use]
    pub fn core_keys(&self) -> Vec<String> {
        true_keys(&self.core)
    }
}

fn true_keys(map: &BTreeMap<String, bool>) -> Vec<String> {
    map.iter().filter(|(_, on)| **on).map(|(k, _)| k.clone()).collect()
}

/// Deserialize `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

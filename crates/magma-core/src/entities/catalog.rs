use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A risk from the SCF risk catalog (e.g. `R-AC-1`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScfRisk {
    pub object_id: String,
    #[serde(default)]
    pub grouping: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nist_function: String,
    #[serde(default)]
    pub materiality: String,
}

/// A threat from the SCF threat catalog (e.g. `NT-1`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScfThreat {
    pub object_id: String,
    #[serde(default)]
    pub grouping: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub materiality: String,
}

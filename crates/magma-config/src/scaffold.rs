//! Settings for scaffolding projects out of SCF configs.

use magma_core::payloads::DEFAULT_PASSING_SCORE;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_passing_score() -> u32 {
    DEFAULT_PASSING_SCORE
}

const fn default_auditor_name_max_len() -> usize {
    60
}

fn default_created_by() -> String {
    "system:scf_config".to_string()
}

const fn default_write_legacy_template() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScaffoldConfig {
    /// Score (0-100) written into every generated auditor's instructions.
    #[serde(default = "default_passing_score")]
    pub passing_score: u32,

    /// Control titles longer than this many characters are cut in auditor names.
    #[serde(default = "default_auditor_name_max_len")]
    pub auditor_name_max_len: usize,

    /// `created_by` stamped on generated evidence requests.
    #[serde(default = "default_created_by")]
    pub created_by: String,

    /// Also persist the page tree as a documentation template.
    #[serde(default = "default_write_legacy_template")]
    pub write_legacy_template: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            passing_score: default_passing_score(),
            auditor_name_max_len: default_auditor_name_max_len(),
            created_by: default_created_by(),
            write_legacy_template: default_write_legacy_template(),
        }
    }
}

impl ScaffoldConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a passing score above 100, a
    /// zero auditor name length, or a blank `created_by`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.passing_score > 100 {
            return Err(ConfigError::InvalidValue {
                field: "scaffold.passing_score".into(),
                reason: format!("{} is above 100", self.passing_score),
            });
        }
        if self.auditor_name_max_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scaffold.auditor_name_max_len".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.created_by.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scaffold.created_by".into(),
                reason: "must not be blank".into(),
            });
        }
        Ok(())
    }
}

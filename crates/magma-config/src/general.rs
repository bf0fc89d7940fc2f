use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

/// Settings that are not tied to storage or scaffolding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size for `magma project list` when `--limit` is not given.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// Rejects a zero `default_limit`.
    pub(crate) fn validate(&self) -> Result<(), crate::ConfigError> {
        if self.default_limit == 0 {
            return Err(crate::ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

//! Local database configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> String {
    ".magma/magma.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.path.trim().is_empty()
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Parent directory that must exist before the database is opened.
    ///
    /// `None` for in-memory databases and bare file names.
    pub fn parent_dir(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        PathBuf::from(&self.path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_into_dot_magma() {
        let config = DatabaseConfig::default();
        assert!(config.is_configured());
        assert!(!config.is_in_memory());
        assert_eq!(config.parent_dir(), Some(PathBuf::from(".magma")));
    }

    #[test]
    fn memory_and_bare_names_have_no_parent() {
        let memory = DatabaseConfig {
            path: ":memory:".into(),
        };
        assert_eq!(memory.parent_dir(), None);

        let bare = DatabaseConfig {
            path: "magma.db".into(),
        };
        assert_eq!(bare.parent_dir(), None);
    }

    #[test]
    fn blank_path_is_not_configured() {
        let config = DatabaseConfig { path: "  ".into() };
        assert!(!config.is_configured());
    }
}

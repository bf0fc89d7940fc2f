use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read and parse a JSON file, naming the file in any error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

use anyhow::Context;
use magma_core::fingerprint::fingerprint;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FingerprintArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FingerprintResponse {
    file: String,
    /// Empty when the file is not valid JSON.
    fingerprint: String,
}

/// Handle `magma fingerprint`. Needs no database.
pub fn handle(args: &FingerprintArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    output(
        &FingerprintResponse {
            file: args.file.display().to_string(),
            fingerprint: fingerprint(&raw),
        },
        flags.format,
    )
}

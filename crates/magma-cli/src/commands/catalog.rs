use magma_core::entities::{ScfRisk, ScfThreat};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{CatalogCommands, CatalogImportArgs};
use crate::commands::shared::read_json;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ImportResponse {
    kind: &'static str,
    read: usize,
    upserted: usize,
}

/// Handle `magma catalog`.
pub async fn handle(
    action: &CatalogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CatalogCommands::Import(args) => import(args, ctx, flags).await,
    }
}

async fn import(args: &CatalogImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = if let Some(path) = &args.risks {
        let risks: Vec<ScfRisk> = read_json(path)?;
        ImportResponse {
            kind: "risks",
            read: risks.len(),
            upserted: ctx.service.upsert_risks(&risks).await?,
        }
    } else if let Some(path) = &args.threats {
        let threats: Vec<ScfThreat> = read_json(path)?;
        ImportResponse {
            kind: "threats",
            read: threats.len(),
            upserted: ctx.service.upsert_threats(&threats).await?,
        }
    } else {
        anyhow::bail!("catalog import needs --risks or --threats");
    };
    output(&response, flags.format)
}

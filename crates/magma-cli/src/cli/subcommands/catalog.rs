use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand};

/// Catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CatalogCommands {
    /// Upsert risks or threats from a JSON array file.
    Import(CatalogImportArgs),
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["risks", "threats"])))]
pub struct CatalogImportArgs {
    /// JSON array of SCF risks.
    #[arg(long)]
    pub risks: Option<PathBuf>,
    /// JSON array of SCF threats.
    #[arg(long)]
    pub threats: Option<PathBuf>,
}

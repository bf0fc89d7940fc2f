use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{CatalogCommands, OrgCommands, ProjectCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Organizations.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// SCF risk and threat catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Create a project from an SCF config document.
    Scaffold(ScaffoldArgs),
    /// Seed a project with a default documentation bundle.
    Seed(SeedArgs),
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Print a project's document tree.
    Tree(TreeArgs),
    /// Print the content fingerprint of a JSON file.
    Fingerprint(FingerprintArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ScaffoldArgs {
    /// Organization that owns the new project.
    #[arg(long)]
    pub org: String,
    /// Path to the SCF config document (JSON).
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SeedArgs {
    /// Organization that owns the project.
    #[arg(long)]
    pub org: String,
    /// Project to seed.
    #[arg(long)]
    pub project: String,
    /// Path to the documentation bundle (JSON).
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct TreeArgs {
    /// Project whose documents to print.
    #[arg(long)]
    pub project: String,
}

#[derive(Clone, Debug, Args)]
pub struct FingerprintArgs {
    /// JSON file to fingerprint.
    pub file: PathBuf,
}

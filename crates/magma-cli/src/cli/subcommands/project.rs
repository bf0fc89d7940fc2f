use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Show a project.
    Get {
        /// Project ID.
        id: String,
    },
    /// List an organization's projects, newest first.
    List {
        /// Organization ID.
        #[arg(long)]
        org: String,
    },
    /// Delete a project and everything under it.
    Delete {
        /// Project ID.
        id: String,
    },
}

use clap::Subcommand;

/// Organization commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// Create an organization.
    Create {
        /// Display name.
        name: String,
    },
    /// Show an organization.
    Get {
        /// Organization ID.
        id: String,
    },
    /// List organizations.
    List,
}

//! Organization subcommands

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum OrgAction {
    /// List organizations the token can access
    #[command(visible_alias = "ls")]
    List,

    /// Make an organization the current one (clears the board when it changes)
    Select {
        /// Organization ID or name
        organization: String,
    },

    /// Show the current organization
    Current,
}

//! Column subcommands (all act on the current board or --board)

use clap::{Parser, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ColumnAction {
    /// List columns in board order
    #[command(visible_alias = "ls")]
    List,

    /// Add a column
    Create(ColumnCreateArgs),

    /// Rename a column
    Rename {
        /// Column ID or name
        column: String,
        /// New name
        name: String,
    },

    /// Move a column to another position
    Move {
        /// Column ID or name
        column: String,
        /// New zero-based position
        position: u32,
    },

    /// Delete a column and its cards
    #[command(visible_alias = "rm")]
    Delete(ColumnDeleteArgs),
}

/// Arguments for 'column create'
#[derive(Parser, Debug)]
pub struct ColumnCreateArgs {
    /// Column name
    pub name: String,

    /// Zero-based position (defaults to last)
    #[arg(long)]
    pub position: Option<u32>,
}

/// Arguments for 'column delete'
#[derive(Parser, Debug)]
pub struct ColumnDeleteArgs {
    /// Column ID or name
    pub column: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, alias = "yes", default_value_t = false)]
    pub force: bool,
}

//! Board subcommands

use clap::{Parser, Subcommand};

use crate::config::defaults;

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// List boards of the current organization
    #[command(visible_alias = "ls")]
    List(BoardListArgs),

    /// Make a board the current one (use --org to pick it from another organization)
    Select {
        /// Board ID or name
        #[arg(value_name = "BOARD")]
        target: String,
    },

    /// Show the current board
    Current,

    /// Show a board with its columns and cards
    Show(BoardShowArgs),
}

/// Arguments for 'board list'
#[derive(Parser, Debug)]
pub struct BoardListArgs {
    /// Only boards in this collection
    #[arg(long)]
    pub collection: Option<String>,

    /// Include archived boards
    #[arg(long, default_value_t = false)]
    pub archived: bool,
}

/// Arguments for 'board show'
#[derive(Parser, Debug)]
pub struct BoardShowArgs {
    /// Board ID or name (defaults to the current board)
    #[arg(value_name = "BOARD")]
    pub target: Option<String>,

    /// Cards shown per column
    #[arg(long, default_value_t = defaults::MAX_CARDS_PER_COLUMN)]
    pub limit: usize,
}

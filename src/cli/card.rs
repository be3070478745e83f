//! Card subcommands
//!
//! Cards are addressed by ID, by `#<number>` or by name (name lookup
//! searches the current board).

use clap::{Parser, Subcommand};

#[derive(Subcommand, Debug)]
pub enum CardAction {
    /// List cards of the current board
    #[command(visible_alias = "ls")]
    List(CardListArgs),

    /// Show one card
    Show {
        /// Card ID, #number or name
        card: String,
    },

    /// Create a card on the current board
    Create(CardCreateArgs),

    /// Change the name or description of a card
    Update(CardUpdateArgs),

    /// Move a card to another column of its board
    Move(CardMoveArgs),

    /// Assign users to a card (or unassign with --remove)
    Assign(CardAssignArgs),

    /// Add tags to a card (or remove with --remove)
    Tag(CardTagArgs),

    /// Delete a card
    #[command(visible_alias = "rm")]
    Delete(CardDeleteArgs),
}

/// Arguments for 'card list'
#[derive(Parser, Debug)]
pub struct CardListArgs {
    /// Only cards in this column (ID or name)
    #[arg(long)]
    pub column: Option<String>,

    /// Cards of a collection instead of a board
    #[arg(long, conflicts_with = "column")]
    pub collection: Option<String>,
}

/// Arguments for 'card create'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        favroctl card create \"Fix login\" --column Todo\n  \
        favroctl card create \"Write docs\" --description \"User guide\"")]
pub struct CardCreateArgs {
    /// Card name
    pub name: String,

    /// Column (ID or name) on the current board
    #[arg(long)]
    pub column: Option<String>,

    /// Detailed description
    #[arg(long)]
    pub description: Option<String>,
}

/// Arguments for 'card update'
#[derive(Parser, Debug)]
pub struct CardUpdateArgs {
    /// Card ID, #number or name
    pub card: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New detailed description
    #[arg(long)]
    pub description: Option<String>,
}

/// Arguments for 'card move'
#[derive(Parser, Debug)]
pub struct CardMoveArgs {
    /// Card ID, #number or name
    pub card: String,

    /// Target column (ID or name)
    #[arg(long)]
    pub column: String,
}

/// Arguments for 'card assign'
#[derive(Parser, Debug)]
pub struct CardAssignArgs {
    /// Card ID, #number or name
    pub card: String,

    /// Users (ID, name or email)
    #[arg(required = true)]
    pub users: Vec<String>,

    /// Unassign instead of assign
    #[arg(long, default_value_t = false)]
    pub remove: bool,
}

/// Arguments for 'card tag'
#[derive(Parser, Debug)]
pub struct CardTagArgs {
    /// Card ID, #number or name
    pub card: String,

    /// Tag names
    #[arg(required = true)]
    pub tags: Vec<String>,

    /// Remove the tags instead of adding them
    #[arg(long, default_value_t = false)]
    pub remove: bool,
}

/// Arguments for 'card delete'
#[derive(Parser, Debug)]
pub struct CardDeleteArgs {
    /// Card ID, #number or name
    pub card: String,

    /// Delete the card from every board it appears on
    #[arg(long, default_value_t = false)]
    pub everywhere: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, alias = "yes", default_value_t = false)]
    pub force: bool,
}

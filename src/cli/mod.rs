//! CLI argument parsing

mod auth;
mod board;
mod card;
mod column;
mod org;

use clap::{Parser, Subcommand};

use crate::config::{defaults, env as env_config};

pub use auth::LoginArgs;
pub use board::{BoardAction, BoardListArgs, BoardShowArgs};
pub use card::{
    CardAction, CardAssignArgs, CardCreateArgs, CardDeleteArgs, CardListArgs, CardMoveArgs,
    CardTagArgs, CardUpdateArgs,
};
pub use column::{ColumnAction, ColumnCreateArgs, ColumnDeleteArgs};
pub use org::OrgAction;

/// Favro command-line client
#[derive(Parser, Debug)]
#[command(name = "favroctl")]
#[command(version)]
#[command(about = "Work with Favro organizations, boards, columns and cards", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// No spinners and no interactive prompts
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// API token (overrides FAVRO_TOKEN and the stored login)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Account email for the token (overrides FAVRO_EMAIL)
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Organization ID (overrides FAVRO_ORGANIZATION_ID and the selected organization)
    #[arg(long, global = true)]
    pub org: Option<String>,

    /// Board ID (overrides FAVRO_BOARD_ID and the selected board)
    #[arg(long, global = true)]
    pub board: Option<String>,

    /// Favro API root
    #[arg(long, global = true, env = env_config::API_URL)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate an API token and store it
    Login(LoginArgs),

    /// Forget the stored token and the selected organization/board
    Logout,

    /// Show the account behind the current token
    Whoami,

    /// List and select organizations
    #[command(visible_alias = "orgs", visible_alias = "organization")]
    Org {
        #[command(subcommand)]
        action: OrgAction,
    },

    /// List, select and show boards
    #[command(visible_alias = "boards")]
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Manage the columns of the current board
    #[command(visible_alias = "columns", visible_alias = "col")]
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },

    /// Manage cards
    #[command(visible_alias = "cards")]
    Card {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Show the stored context without contacting Favro
    Context,
}

//! favroctl - A command-line client for Favro
//!
//! Work with Favro organizations, boards, columns and cards from the terminal.
//!
//! # Features
//!
//! - Token login validated against Favro before it is stored
//! - Persisted current organization and board, overridable per invocation
//!   by flags and environment variables
//! - One request pipeline: authentication, pagination, error normalization,
//!   rate-limit backoff and credential invalidation on 401
//! - Table or JSON output
//!
//! # Example
//!
//! ```bash
//! # Log in (prompts for token and email)
//! favroctl login
//!
//! # Pick an organization and a board
//! favroctl org select "Acme Inc"
//! favroctl board select "Sprint 42"
//!
//! # Work with cards
//! favroctl card list --column Todo
//! favroctl card move "#12" --column Done
//!
//! # One-off override without touching the stored context
//! FAVRO_BOARD_ID=b-7 favroctl board show --json
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod favro;
pub mod output;
pub mod runtime;
pub mod ui;

pub use cli::{Cli, Command};
pub use context::{
    ContextManager, ContextPersistence, CredentialStore, Credentials, Overrides, Session,
    SessionResolver, SessionScope,
};
pub use error::{ErrorKind, FavroError, Result};
pub use favro::{
    run_board_command, run_card_command, run_column_command, run_org_command, Board, Card,
    ClientSettings, Column, FavroClient, FavroResource, Organization, RetryPolicy, User,
};
pub use runtime::Runtime;

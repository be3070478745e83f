//! Credentials, session and context management
//!
//! The local config file holds the API token and the selected
//! organization/board. Every invocation resolves a [`Session`] from it,
//! layered under environment and CLI overrides.

mod commands;
mod manager;
mod models;
mod resolve;
mod store;

pub use commands::run_context_command;
pub use manager::ContextManager;
pub use models::{ConfigFile, Context, ContextState, Credentials};
pub use resolve::{OverrideValues, Overrides, Session, SessionResolver, SessionScope, ValueSource};
pub use store::{ContextPersistence, CredentialStore};

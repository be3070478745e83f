//! Card module

mod api;
mod commands;
mod models;

pub use commands::run_card_command;
pub use models::{parse_sequential_id, Assignment, Card, CardDraft, CardFilter, CardUpdate};

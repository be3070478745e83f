//! Column module

mod api;
mod commands;
mod models;

pub use commands::run_column_command;
pub use models::{Column, ColumnUpdate};

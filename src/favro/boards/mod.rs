//! Board module

mod api;
mod commands;
mod models;

pub use commands::run_board_command;
pub use models::{Board, BOARD_TYPE};

//! Output formatting module
//!
//! Every listing renders either as a borderless table or as pretty JSON.

mod boards;
mod cards;
mod columns;
mod common;
mod organizations;
mod users;

pub use boards::{output_board_overview, output_boards};
pub use cards::{output_card, output_cards};
pub use columns::output_columns;
pub use common::{print_json, truncate};
pub use organizations::output_organizations;
pub use users::output_user;

//! Favro API client module
//!
//! One request pipeline ([`FavroClient`]) plus typed operations per resource.

pub mod boards;
pub mod cards;
pub(crate) mod client;
pub mod columns;
pub mod organizations;
pub mod response;
pub mod retry;
pub mod traits;
pub mod users;

pub use boards::{run_board_command, Board};
pub use cards::{run_card_command, Card, CardDraft, CardFilter, CardUpdate};
pub use client::{ClientSettings, FavroClient};
pub use columns::{run_column_command, Column, ColumnUpdate};
pub use organizations::{run_org_command, Organization};
pub use retry::{RetryDecision, RetryPolicy};
pub use traits::{FavroResource, Page, PageCursor, Query};
pub use users::User;

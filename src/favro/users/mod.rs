//! User module

mod api;
mod models;

pub use models::User;

//! User API operations

use log::debug;

use crate::config::api;
use crate::error::{FavroError, Result};
use crate::favro::traits::{find_match, Query};
use crate::favro::FavroClient;

use super::models::User;

impl FavroClient {
    /// List users of the session organization
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.session().require_organization()?;
        debug!("Fetching users");
        self.fetch_all(api::USERS, Query::new()).await
    }

    /// Find a user by ID, name or email
    pub async fn find_user(&self, input: &str) -> Result<User> {
        let users = self.list_users().await?;
        find_match(&users, input)
            .cloned()
            .ok_or_else(|| FavroError::not_found(format!("User '{}' not found", input)))
    }
}

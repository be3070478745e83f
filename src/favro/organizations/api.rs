//! Organization API operations

use log::debug;

use crate::config::api;
use crate::error::{FavroError, Result};
use crate::favro::traits::{find_match, Query};
use crate::favro::FavroClient;

use super::models::Organization;

impl FavroClient {
    /// List every organization the token can access
    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        debug!("Fetching organizations");
        self.fetch_all(api::ORGANIZATIONS, Query::new()).await
    }

    /// Get a single organization by ID
    pub async fn get_organization(&self, organization_id: &str) -> Result<Organization> {
        let path = format!(
            "{}/{}",
            api::ORGANIZATIONS,
            urlencoding::encode(organization_id)
        );
        debug!("Fetching organization '{}'", organization_id);
        self.get(&path, &Query::new()).await
    }

    /// Find an organization by ID, falling back to a name match over the listing
    pub async fn find_organization(&self, id_or_name: &str) -> Result<Organization> {
        match self.get_organization(id_or_name).await {
            Ok(org) => Ok(org),
            Err(FavroError::NotFound { status, .. }) => {
                debug!(
                    "Organization '{}' not found by ID, searching by name",
                    id_or_name
                );
                let organizations = self.list_organizations().await?;
                find_match(&organizations, id_or_name)
                    .cloned()
                    .ok_or_else(|| FavroError::NotFound {
                        status,
                        message: format!("Organization '{}' not found", id_or_name),
                    })
            }
            Err(e) => Err(e),
        }
    }
}

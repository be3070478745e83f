//! Organization data models

use serde::{Deserialize, Serialize};

use crate::favro::traits::FavroResource;

/// Organization data from the Favro API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub shared_to_users: Vec<OrganizationMember>,
}

/// Membership entry of an organization
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMember {
    pub user_id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub join_date: Option<String>,
}

impl Organization {
    /// Number of members the organization is shared with
    pub fn member_count(&self) -> usize {
        self.shared_to_users.len()
    }
}

impl FavroResource for Organization {
    fn id(&self) -> &str {
        &self.organization_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

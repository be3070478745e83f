//! User data models

use serde::{Deserialize, Serialize};

use crate::favro::traits::FavroResource;

/// Organization user from the Favro API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization_role: Option<String>,
}

impl User {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn role(&self) -> &str {
        self.organization_role.as_deref().unwrap_or("")
    }
}

impl FavroResource for User {
    fn id(&self) -> &str {
        &self.user_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, input: &str) -> bool {
        if input.is_empty() {
            return false;
        }
        self.user_id == input
            || self.name.eq_ignore_ascii_case(input)
            || self.email().eq_ignore_ascii_case(input)
    }
}

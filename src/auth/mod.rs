//! Login and identity
//!
//! A token is only stored after Favro accepted it.

mod commands;

use log::{debug, info};

use crate::context::{CredentialStore, Credentials, Session, ValueSource};
use crate::error::{FavroError, Result};
use crate::favro::{ClientSettings, FavroClient, FavroResource, Organization, User};

pub use commands::{run_login_command, run_logout_command, run_whoami_command};

/// Who the current token belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// User record found in the session organization by email
    User {
        user: User,
        organization_id: String,
    },
    /// No organization or no email to look up; the reachable organizations
    Account { organizations: Vec<Organization> },
}

/// Validate `credentials` against Favro, then store them.
///
/// The token is checked by listing organizations with a throwaway session.
/// On any failure nothing is written.
pub async fn login(
    store: &CredentialStore,
    settings: &ClientSettings,
    credentials: Credentials,
) -> Result<Vec<Organization>> {
    let session = Session::from_credentials(&credentials, ValueSource::Cli)?;
    let client = FavroClient::new(session, settings.clone());

    debug!("Validating token against {}", settings.base_url);
    let organizations = client.list_organizations().await?;

    store.save(&credentials)?;
    info!(
        "Stored credentials in {} ({} organization(s) reachable)",
        store.path().display(),
        organizations.len()
    );
    Ok(organizations)
}

/// Identify the account behind the client's session
pub async fn whoami(client: &FavroClient) -> Result<Identity> {
    let session = client.session();
    match (session.organization_id(), session.email()) {
        (Some(organization_id), Some(email)) => {
            let user = client.find_user(email).await.map_err(|e| match e {
                FavroError::NotFound { status, .. } => FavroError::NotFound {
                    status,
                    message: format!(
                        "No user with email '{}' in organization '{}'",
                        email, organization_id
                    ),
                },
                other => other,
            })?;
            debug!("Authenticated as user '{}'", user.id());
            Ok(Identity::User {
                user,
                organization_id: organization_id.to_string(),
            })
        }
        _ => Ok(Identity::Account {
            organizations: client.list_organizations().await?,
        }),
    }
}

//! Selection of the current organization and board

use log::{debug, info};

use crate::error::{FavroError, Result};
use crate::favro::{Board, FavroClient, Organization};

use super::models::Context;
use super::store::ContextPersistence;

/// Owns every mutation of the persisted [`Context`].
///
/// Each selection validates against the remote first and writes once,
/// so a failure at any step leaves the previous context in place.
pub struct ContextManager<S: ContextPersistence> {
    store: S,
}

impl<S: ContextPersistence> ContextManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Make `id_or_name` the current organization.
    ///
    /// Switching to another organization drops the selected board.
    pub async fn select_organization(
        &self,
        client: &FavroClient,
        id_or_name: &str,
    ) -> Result<Organization> {
        let id_or_name = id_or_name.trim();
        if id_or_name.is_empty() {
            return Err(FavroError::invalid("Organization must not be empty"));
        }

        let organization = client.find_organization(id_or_name).await?;

        let current = self.store.load_context()?;
        let next = current.with_organization(&organization.organization_id);
        if next == current {
            debug!(
                "Organization '{}' already selected",
                organization.organization_id
            );
        } else {
            self.store.save_context(&next)?;
        }

        info!(
            "Selected organization '{}' ({})",
            organization.name, organization.organization_id
        );
        Ok(organization)
    }

    /// Make `board_id` the current board.
    ///
    /// The organization is `explicit_org` when given, else the client's
    /// session organization. Organization and board are persisted together.
    pub async fn select_board(
        &self,
        client: &FavroClient,
        board_id: &str,
        explicit_org: Option<&str>,
    ) -> Result<Board> {
        let board_id = board_id.trim();
        if board_id.is_empty() {
            return Err(FavroError::invalid("Board must not be empty"));
        }

        let organization_id = explicit_org
            .or(client.session().organization_id())
            .ok_or(FavroError::NoOrganizationSelected)?
            .to_string();

        let scoped;
        let client = if client.session().organization_id() == Some(organization_id.as_str()) {
            client
        } else {
            scoped = client.scoped_to(&organization_id);
            &scoped
        };

        let board = client.find_board(board_id).await?;
        if board.organization_id != organization_id {
            return Err(FavroError::OrganizationMismatch {
                board_id: board.widget_common_id.clone(),
                expected: organization_id,
                actual: board.organization_id.clone(),
            });
        }

        let next = Context::with_board(&organization_id, &board.widget_common_id);
        self.store.save_context(&next)?;

        info!(
            "Selected board '{}' ({}) in organization '{}'",
            board.name, board.widget_common_id, organization_id
        );
        Ok(board)
    }

    /// Persisted context, without any network call
    pub fn current(&self) -> Result<Context> {
        self.store.load_context()
    }

    /// Forget credentials and context
    pub fn logout(&self) -> Result<()> {
        self.store.reset()?;
        info!("Logged out");
        Ok(())
    }
}

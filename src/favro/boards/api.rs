//! Board API operations

use log::debug;

use crate::config::api;
use crate::error::{FavroError, Result};
use crate::favro::traits::{find_match, Query};
use crate::favro::FavroClient;

use super::models::Board;

impl FavroClient {
    /// List boards of the session organization.
    ///
    /// Backlogs are filtered out; `archived` includes archived boards.
    pub async fn list_boards(&self, collection_id: Option<&str>, archived: bool) -> Result<Vec<Board>> {
        self.session().require_organization()?;
        let query = Query::new()
            .push_opt("collectionId", collection_id)
            .push_opt("archived", archived.then_some("true"));
        debug!("Fetching boards (collection={:?}, archived={})", collection_id, archived);

        let widgets: Vec<Board> = self.fetch_all(api::WIDGETS, query).await?;
        Ok(widgets.into_iter().filter(Board::is_board).collect())
    }

    /// Get a single board by its widget common ID
    pub async fn get_board(&self, board_id: &str) -> Result<Board> {
        self.session().require_organization()?;
        let path = format!("{}/{}", api::WIDGETS, urlencoding::encode(board_id));
        debug!("Fetching board '{}'", board_id);
        self.get(&path, &Query::new()).await
    }

    /// Find a board by ID, falling back to a name match over the listing
    pub async fn find_board(&self, id_or_name: &str) -> Result<Board> {
        match self.get_board(id_or_name).await {
            Ok(board) => Ok(board),
            Err(FavroError::NotFound { status, .. }) => {
                debug!("Board '{}' not found by ID, searching by name", id_or_name);
                let boards = self.list_boards(None, false).await?;
                find_match(&boards, id_or_name)
                    .cloned()
                    .ok_or_else(|| FavroError::NotFound {
                        status,
                        message: format!("Board '{}' not found", id_or_name),
                    })
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve an explicit board argument, or else the session's board
    pub async fn resolve_board(&self, explicit: Option<&str>) -> Result<Board> {
        match explicit.or(self.session().board_id()) {
            Some(board) => self.find_board(board).await,
            None => Err(FavroError::invalid(
                "No board specified. Pass a board or run 'favroctl board select <id>'.",
            )),
        }
    }
}

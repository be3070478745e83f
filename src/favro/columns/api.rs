//! Column API operations

use log::debug;
use reqwest::Method;
use serde_json::json;

use crate::config::api;
use crate::error::{FavroError, Result};
use crate::favro::traits::{find_match, Query};
use crate::favro::FavroClient;

use super::models::{Column, ColumnUpdate};

impl FavroClient {
    /// List the columns of a board, ordered by position
    pub async fn list_columns(&self, board_id: &str) -> Result<Vec<Column>> {
        self.session().require_organization()?;
        debug!("Fetching columns for board '{}'", board_id);
        let query = Query::new().push("widgetCommonId", board_id);
        let mut columns: Vec<Column> = self.fetch_all(api::COLUMNS, query).await?;
        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }

    /// Find a column of a board by ID or name
    pub async fn find_column(&self, board_id: &str, id_or_name: &str) -> Result<Column> {
        let columns = self.list_columns(board_id).await?;
        find_match(&columns, id_or_name)
            .cloned()
            .ok_or_else(|| {
                FavroError::not_found(format!(
                    "Column '{}' not found on board '{}'",
                    id_or_name, board_id
                ))
            })
    }

    /// Create a column on a board
    pub async fn create_column(
        &self,
        board_id: &str,
        name: &str,
        position: Option<u32>,
    ) -> Result<Column> {
        self.session().require_organization()?;
        if name.trim().is_empty() {
            return Err(FavroError::invalid("Column name must not be empty"));
        }
        let mut body = json!({"widgetCommonId": board_id, "name": name});
        if let Some(position) = position {
            body["position"] = position.into();
        }
        debug!("Creating column '{}' on board '{}'", name, board_id);
        self.request(Method::POST, api::COLUMNS, &Query::new(), Some(&body))
            .await
    }

    /// Rename and/or move a column
    pub async fn update_column(&self, column_id: &str, update: &ColumnUpdate) -> Result<Column> {
        self.session().require_organization()?;
        if update.is_empty() {
            return Err(FavroError::invalid(
                "Nothing to update: provide a new name or position",
            ));
        }
        let path = format!("{}/{}", api::COLUMNS, urlencoding::encode(column_id));
        debug!("Updating column '{}'", column_id);
        self.request(Method::PUT, &path, &Query::new(), Some(&update.to_body()))
            .await
    }

    /// Delete a column (and its cards)
    pub async fn delete_column(&self, column_id: &str) -> Result<()> {
        self.session().require_organization()?;
        let path = format!("{}/{}", api::COLUMNS, urlencoding::encode(column_id));
        debug!("Deleting column '{}'", column_id);
        self.request_empty(Method::DELETE, &path, &Query::new(), None)
            .await
    }
}

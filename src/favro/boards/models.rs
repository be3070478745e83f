//! Board data models
//!
//! Favro calls boards and backlogs "widgets"; a board is a widget of type `board`.

use serde::{Deserialize, Serialize};

use crate::favro::traits::FavroResource;

/// Widget type of a board
pub const BOARD_TYPE: &str = "board";

/// Board (widget) data from the Favro API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub widget_common_id: String,
    pub organization_id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub widget_type: Option<String>,
    #[serde(default)]
    pub collection_ids: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub color: Option<String>,
}

impl Board {
    /// Whether this widget is a board (as opposed to a backlog)
    pub fn is_board(&self) -> bool {
        matches!(self.widget_type.as_deref(), None | Some(BOARD_TYPE))
    }

    pub fn widget_type(&self) -> &str {
        self.widget_type.as_deref().unwrap_or(BOARD_TYPE)
    }
}

impl FavroResource for Board {
    fn id(&self) -> &str {
        &self.widget_common_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

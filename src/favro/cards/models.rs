//! Card data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::favro::traits::FavroResource;

/// Card data from the Favro API.
///
/// A card that lives on several boards has one `card_id` per board and a
/// shared `card_common_id`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_id: String,
    pub card_common_id: String,
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub sequential_id: u64,
    #[serde(default)]
    pub widget_common_id: Option<String>,
    #[serde(default)]
    pub column_id: Option<String>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub tasks_total: u32,
    #[serde(default)]
    pub tasks_done: u32,
}

/// User assignment on a card
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub user_id: String,
    #[serde(default)]
    pub completed: bool,
}

impl Card {
    /// `#<sequentialId>` as shown in the Favro UI
    pub fn reference(&self) -> String {
        format!("#{}", self.sequential_id)
    }

    pub fn assignee_ids(&self) -> Vec<&str> {
        self.assignments.iter().map(|a| a.user_id.as_str()).collect()
    }
}

impl FavroResource for Card {
    fn id(&self) -> &str {
        &self.card_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, input: &str) -> bool {
        self.card_id == input
            || self.card_common_id == input
            || self.reference() == input
            || self.name == input
            || self.name.eq_ignore_ascii_case(input)
    }
}

/// Parse a `#123` card reference into its sequential id
pub fn parse_sequential_id(input: &str) -> Option<u64> {
    input.strip_prefix('#')?.parse().ok()
}

/// Server-side filter for card listings. Favro requires at least one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub board_id: Option<String>,
    pub column_id: Option<String>,
    pub collection_id: Option<String>,
    pub sequential_id: Option<u64>,
}

impl CardFilter {
    pub fn board(board_id: impl Into<String>) -> Self {
        Self {
            board_id: Some(board_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.board_id.is_none()
            && self.column_id.is_none()
            && self.collection_id.is_none()
            && self.sequential_id.is_none()
    }
}

/// Fields for a new card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub name: String,
    pub board_id: Option<String>,
    pub column_id: Option<String>,
    pub description: Option<String>,
}

impl CardDraft {
    pub(crate) fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert("name".to_string(), self.name.clone().into());
        insert_opt(&mut body, "widgetCommonId", self.board_id.as_deref());
        insert_opt(&mut body, "columnId", self.column_id.as_deref());
        insert_opt(&mut body, "detailedDescription", self.description.as_deref());
        serde_json::Value::Object(body)
    }
}

/// Changes for an existing card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Board to move to (required by Favro together with `column_id`)
    pub board_id: Option<String>,
    pub column_id: Option<String>,
    pub add_assignments: Vec<String>,
    pub remove_assignments: Vec<String>,
    /// Tag names
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.column_id.is_none()
            && self.add_assignments.is_empty()
            && self.remove_assignments.is_empty()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
    }

    pub(crate) fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        insert_opt(&mut body, "name", self.name.as_deref());
        insert_opt(&mut body, "detailedDescription", self.description.as_deref());
        insert_opt(&mut body, "widgetCommonId", self.board_id.as_deref());
        insert_opt(&mut body, "columnId", self.column_id.as_deref());
        insert_list(&mut body, "addAssignmentIds", &self.add_assignments);
        insert_list(&mut body, "removeAssignmentIds", &self.remove_assignments);
        insert_list(&mut body, "addTags", &self.add_tags);
        insert_list(&mut body, "removeTags", &self.remove_tags);
        serde_json::Value::Object(body)
    }
}

fn insert_opt(body: &mut serde_json::Map<String, serde_json::Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        body.insert(key.to_string(), value.into());
    }
}

fn insert_list(body: &mut serde_json::Map<String, serde_json::Value>, key: &str, values: &[String]) {
    if !values.is_empty() {
        body.insert(key.to_string(), values.to_vec().into());
    }
}

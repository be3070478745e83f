//! Column data models

use serde::{Deserialize, Serialize};

use crate::favro::traits::FavroResource;

/// Column data from the Favro API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub column_id: String,
    pub organization_id: String,
    pub widget_common_id: String,
    pub name: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub card_count: u32,
    #[serde(default)]
    pub time_sum: Option<u64>,
    #[serde(default)]
    pub estimation_sum: Option<f64>,
}

impl FavroResource for Column {
    fn id(&self) -> &str {
        &self.column_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Changes for an existing column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnUpdate {
    pub name: Option<String>,
    pub position: Option<u32>,
}

impl ColumnUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.position.is_none()
    }

    pub(crate) fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if let Some(name) = &self.name {
            body.insert("name".to_string(), name.clone().into());
        }
        if let Some(position) = self.position {
            body.insert("position".to_string(), position.into());
        }
        serde_json::Value::Object(body)
    }
}

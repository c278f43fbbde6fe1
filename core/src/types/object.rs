use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{decode, discriminator, Parent, RichText, Timestamp};
use crate::error::ApiError;

/// A page. Property values are kept as raw JSON keyed by property name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub created_time: Timestamp,
    pub last_edited_time: Timestamp,
    #[serde(default)]
    pub archived: bool,
    pub parent: Parent,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A database. `properties` holds the raw property schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: Uuid,
    pub created_time: Timestamp,
    pub last_edited_time: Timestamp,
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Database {
    pub fn plain_title(&self) -> String {
        self.title.iter().map(|t| t.plain_text.as_str()).collect()
    }
}

/// One hit from `search`, told apart by the item's `object` field.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Page(Page),
    Database(Database),
}

impl SearchResult {
    pub fn from_value(value: &Value) -> Result<Self, ApiError> {
        let tag = discriminator(value, "object");
        match tag {
            Some("page") => Ok(SearchResult::Page(decode(value)?)),
            Some("database") => Ok(SearchResult::Database(decode(value)?)),
            _ => Err(ApiError::unknown_variant("search result", tag)),
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            SearchResult::Page(p) => p.id,
            SearchResult::Database(d) => d.id,
        }
    }
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SearchResult::from_value(&value).map_err(de::Error::custom)
    }
}

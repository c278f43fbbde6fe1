//! Decoded API objects.
//!
//! # Design
//! Every value here is built fresh from one JSON payload and handed to the
//! caller; nothing is cached or mutated afterwards. Polymorphic objects
//! (`Block`, `User`, `SearchResult`) read their discriminator first and map it
//! through a closed tag enum, so an unknown tag is an error rather than a
//! silently partial object.

mod block;
mod object;
mod user;

pub use block::{Block, BlockContent, BlockType, ChildPageBlock, TextBlock, ToDoBlock};
pub use object::{Database, Page, SearchResult};
pub use user::{BotUser, PersonDetails, PersonUser, User, UserType};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

pub type Timestamp = DateTime<Utc>;

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedList<T> {
    /// Cursor to pass as `start_cursor` for the next page, if there is one.
    pub fn cursor(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for PaginatedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// A span of formatted text. Only the rendered text is decoded; styling
/// annotations are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Where a page or database lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    DatabaseId { database_id: Uuid },
    PageId { page_id: Uuid },
    Workspace { workspace: bool },
}

/// Read a string discriminator such as `type` or `object`.
pub(crate) fn discriminator<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

pub(crate) fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    T::deserialize(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

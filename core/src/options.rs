//! Per-method option structs.
//!
//! # Design
//! Each struct names exactly the fields its endpoint forwards. Unknown keys
//! are ignored when an options value is deserialized from caller JSON, and
//! unset fields are skipped on serialization, so whatever reaches the wire is
//! a subset of the listed fields. `auth` is a per-call token override handed
//! to the transport and is never part of the query or body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Parent;

/// Cursor paging for list endpoints. Forwarded as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip)]
    pub auth: Option<String>,
}

impl ListOptions {
    /// Options for the page following `cursor`.
    pub fn after(cursor: impl Into<String>) -> Self {
        Self {
            start_cursor: Some(cursor.into()),
            ..Self::default()
        }
    }
}

/// Options for endpoints that only address an object by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrieveOptions {
    #[serde(skip)]
    pub auth: Option<String>,
}

/// Body of `blocks.children.append`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppendBlockChildren {
    #[serde(default)]
    pub children: Vec<Value>,
    #[serde(skip)]
    pub auth: Option<String>,
}

/// Body of `databases.create`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDatabase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(skip)]
    pub auth: Option<String>,
}

/// Body of `databases.query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDatabase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip)]
    pub auth: Option<String>,
}

/// Body of `pages.create`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Value>>,
    #[serde(skip)]
    pub auth: Option<String>,
}

/// Body of `pages.update`. Omitted fields stay unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(skip)]
    pub auth: Option<String>,
}

/// Body of `search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip)]
    pub auth: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_keys_are_dropped() {
        let opts: UpdatePage = serde_json::from_value(json!({
            "archived": true,
            "icon": {"emoji": "x"},
            "parent": {"page_id": "abc"}
        }))
        .unwrap();
        let out = serde_json::to_value(&opts).unwrap();
        assert_eq!(out, json!({"archived": true}));
    }

    #[test]
    fn auth_is_never_serialized() {
        let opts = ListOptions {
            page_size: Some(5),
            auth: Some("secret_override".to_string()),
            ..ListOptions::default()
        };
        let out = serde_json::to_value(&opts).unwrap();
        assert_eq!(out, json!({"page_size": 5}));
    }

    #[test]
    fn auth_is_not_read_from_caller_json() {
        let opts: ListOptions = serde_json::from_value(json!({"auth": "secret_x"})).unwrap();
        assert!(opts.auth.is_none());
    }

    #[test]
    fn filtering_is_idempotent() {
        let input = json!({"query": "roadmap", "page_size": 3, "extra": 1});
        let once: SearchOptions = serde_json::from_value(input).unwrap();
        let twice: SearchOptions =
            serde_json::from_value(serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(
            serde_json::to_value(&twice).unwrap(),
            json!({"query": "roadmap", "page_size": 3})
        );
    }

    #[test]
    fn list_options_after_sets_cursor() {
        let opts = ListOptions::after("c-2");
        assert_eq!(opts.start_cursor.as_deref(), Some("c-2"));
        assert!(opts.page_size.is_none());
    }
}

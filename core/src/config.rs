//! Client configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2021-08-16";

/// Options for `NotionClient`.
///
/// `auth` may be left empty when every call supplies its own token override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub auth: Option<String>,
    pub base_url: String,
    pub notion_version: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            auth: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl ClientOptions {
    pub fn with_auth(auth: impl Into<String>) -> Self {
        Self {
            auth: Some(auth.into()),
            ..Self::default()
        }
    }

    /// Defaults overridden by `NOTION_TOKEN` (or `NOTION_API_KEY`) and
    /// `NOTION_BASE_URL` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        options.auth = lookup("NOTION_TOKEN")
            .or_else(|| lookup("NOTION_API_KEY"))
            .filter(|token| !token.trim().is_empty());
        if let Some(base_url) = lookup("NOTION_BASE_URL").filter(|url| !url.trim().is_empty()) {
            options.base_url = base_url;
        }
        options
    }
}

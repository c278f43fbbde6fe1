//! HTTP transport for the Notion API.
//!
//! # Design
//! `NotionClient` is the production `Transport`: it joins request paths onto
//! the configured base URL, injects the bearer token and `Notion-Version`
//! header, and turns non-2xx replies into `ApiError`. It does not retry or
//! page; each `request` is exactly one round-trip. The endpoint accessors
//! borrow the client, so one client serves any number of concurrent calls.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ClientOptions;
use crate::endpoints::{BlocksEndpoint, DatabasesEndpoint, PagesEndpoint, SearchEndpoint, UsersEndpoint};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Params, Transport};

pub const NOTION_VERSION_HEADER: &str = "Notion-Version";

#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    options: ClientOptions,
}

impl NotionClient {
    pub fn new(options: ClientOptions) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::Config(e.to_string()))?;
        let base_url = options.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            options: ClientOptions { base_url, ..options },
        })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientOptions::from_env())
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn blocks(&self) -> BlocksEndpoint<'_> {
        BlocksEndpoint::new(self)
    }

    pub fn databases(&self) -> DatabasesEndpoint<'_> {
        DatabasesEndpoint::new(self)
    }

    pub fn pages(&self) -> PagesEndpoint<'_> {
        PagesEndpoint::new(self)
    }

    pub fn users(&self) -> UsersEndpoint<'_> {
        UsersEndpoint::new(self)
    }

    pub fn search(&self) -> SearchEndpoint<'_> {
        SearchEndpoint::new(self)
    }

    /// Absolute URL for a path template, with or without its leading `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.options.base_url, path.trim_start_matches('/'))
    }

    fn token<'r>(&'r self, request: &'r HttpRequest) -> Result<&'r str, ApiError> {
        request
            .auth
            .as_deref()
            .or(self.options.auth.as_deref())
            .ok_or_else(|| ApiError::Config("no auth token configured".to_string()))
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.options.base_url)
            .field("notion_version", &self.options.notion_version)
            .field("auth", &self.options.auth.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl Transport for NotionClient {
    async fn request(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let url = self.url(&request.path);
        let token = self.token(&request)?;
        log::debug!("{} {}", request.method.as_str(), url);

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
        };
        let mut builder = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .header(NOTION_VERSION_HEADER, &self.options.notion_version);
        if let Some(query) = request.query.as_ref().filter(|q| !q.is_empty()) {
            builder = builder.query(&query_pairs(query));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            log::warn!("{} {} failed: {e}", request.method.as_str(), url);
            ApiError::Transport(e.to_string())
        })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        check_status(status, &text).inspect_err(|e| {
            log::warn!("{} {} returned {e}", request.method.as_str(), url);
        })?;
        serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Render query params as strings. Strings go out verbatim, other scalars as
/// their JSON text.
fn query_pairs(query: &Params) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    if status == 404 {
        return Err(ApiError::NotFound);
    }
    let (code, message) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { code, message }) => (code, message.unwrap_or_else(|| body.to_string())),
        Err(_) => (None, body.to_string()),
    };
    Err(ApiError::Http {
        status,
        code,
        message,
    })
}

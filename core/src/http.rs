//! Request description and the transport contract.
//!
//! # Design
//! Endpoints never touch the network. They describe each call as an
//! `HttpRequest` value and hand it to a `Transport`, which performs the
//! round-trip (auth headers, URL joining, status handling) and returns the
//! decoded JSON body. Tests substitute an in-memory transport; production
//! code uses `NotionClient`.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Query parameters or JSON body fields, keyed by field name.
pub type Params = Map<String, Value>;

/// An API call described as plain data.
///
/// `path` is the literal path template with identifiers substituted. It may
/// or may not start with `/`; transports join it onto their base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Option<Params>,
    pub body: Option<Params>,
    pub auth: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            auth: None,
        }
    }

    pub fn with_query(mut self, query: Params) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_body(mut self, body: Params) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_auth(mut self, auth: Option<&str>) -> Self {
        self.auth = auth.map(str::to_string);
        self
    }
}

/// Issues requests against the API.
///
/// Implementations own authentication, transport and non-2xx handling. A
/// failed call must come back as an `ApiError`; endpoints propagate it as is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: HttpRequest) -> Result<Value, ApiError>;
}

/// Serialize an options struct into the field map forwarded on the wire.
///
/// Options structs skip `None` fields, so the map holds only fields the
/// caller actually set.
pub(crate) fn to_params<T: Serialize>(options: &T) -> Result<Params, ApiError> {
    match serde_json::to_value(options).map_err(|e| ApiError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Serialization(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

//! Endpoint objects grouping the API's operations by resource.
//!
//! # Design
//! Each operation is split like the rest of the crate: an associated
//! `build_*` function produces the `HttpRequest` (path template, verb and
//! whitelisted fields), and an async method sends it through the shared
//! `Transport` and decodes the JSON result. Endpoints borrow the transport;
//! they hold no state of their own and are cheap to create per call site.

mod blocks;
mod databases;
mod pages;
mod search;
mod users;

pub use blocks::{BlocksChildrenEndpoint, BlocksEndpoint};
pub use databases::DatabasesEndpoint;
pub use pages::PagesEndpoint;
pub use search::SearchEndpoint;
pub use users::UsersEndpoint;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpRequest, Transport};

/// Shared base of every resource endpoint.
#[derive(Clone, Copy)]
pub struct Endpoint<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Endpoint<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Send `request` and return the undecoded JSON result.
    pub async fn send_raw(&self, request: HttpRequest) -> Result<Value, ApiError> {
        self.transport.request(request).await
    }

    /// Send `request` and decode the result as `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let value = self.send_raw(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl std::fmt::Debug for Endpoint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport that records requests and replays a canned reply.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::error::ApiError;
    use crate::http::{HttpRequest, Transport};

    pub struct RecordingTransport {
        reply: Value,
        pub requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingTransport {
        pub fn replying(reply: Value) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn last(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().expect("no request sent")
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn request(&self, request: HttpRequest) -> Result<Value, ApiError> {
            self.requests.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    /// Transport that always fails the way a non-2xx reply would.
    pub struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn request(&self, _request: HttpRequest) -> Result<Value, ApiError> {
            Err(ApiError::Http {
                status: 401,
                code: Some("unauthorized".to_string()),
                message: "API token is invalid.".to_string(),
            })
        }
    }
}

//! Error types for the Notion API binding.
//!
//! # Design
//! Transport and API failures (`NotFound`, `Http`, `Transport`) are produced
//! by the `Transport` implementation and pass through the endpoint layer
//! untouched. `UnknownVariant` is the only error the endpoint layer raises on
//! its own: a response whose discriminator is missing or not one of the known
//! tags.

use thiserror::Error;

/// Errors returned by endpoint methods and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API returned 404 for the requested object.
    #[error("resource not found")]
    NotFound,

    /// The API returned a non-2xx status other than 404.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A discriminator field was absent or carried an unknown tag.
    #[error("could not decode {kind} object with type {}", .tag.as_deref().unwrap_or("null"))]
    UnknownVariant {
        kind: &'static str,
        tag: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request options could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The client was built or used with invalid options.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn unknown_variant(kind: &'static str, tag: Option<&str>) -> Self {
        ApiError::UnknownVariant {
            kind,
            tag: tag.map(str::to_string),
        }
    }
}

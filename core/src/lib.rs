//! Typed async binding for the Notion REST API.
//!
//! # Overview
//! Endpoint objects (`blocks`, `databases`, `pages`, `users`, `search`)
//! translate typed options into `HttpRequest` values, send them through a
//! `Transport`, and decode the JSON replies into typed objects.
//!
//! # Design
//! - Every operation is one request: no retries, caching or pagination loops.
//! - Options are per-method structs, so only known fields reach the wire.
//! - Polymorphic replies (blocks, users, search hits) are decoded through
//!   closed tag enums and fail on unknown discriminators.
//! - `NotionClient` is the reqwest-backed `Transport`; tests plug in their own.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod options;
pub mod types;

pub use client::NotionClient;
pub use config::ClientOptions;
pub use endpoints::{
    BlocksChildrenEndpoint, BlocksEndpoint, DatabasesEndpoint, Endpoint, PagesEndpoint,
    SearchEndpoint, UsersEndpoint,
};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, Params, Transport};
pub use options::{
    AppendBlockChildren, CreateDatabase, CreatePage, ListOptions, QueryDatabase, RetrieveOptions,
    SearchOptions, UpdatePage,
};
pub use types::{
    Block, BlockContent, BlockType, BotUser, Database, Page, PaginatedList, Parent, PersonUser,
    RichText, SearchResult, User, UserType,
};

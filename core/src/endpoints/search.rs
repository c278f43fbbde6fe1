use super::Endpoint;
use crate::error::ApiError;
use crate::http::{to_params, HttpMethod, HttpRequest, Transport};
use crate::options::SearchOptions;
use crate::types::{PaginatedList, SearchResult};

#[derive(Debug, Clone, Copy)]
pub struct SearchEndpoint<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> SearchEndpoint<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport),
        }
    }

    pub fn build_query(options: &SearchOptions) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Post, "/search")
            .with_body(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    /// Search pages and databases shared with the integration.
    pub async fn query(&self, options: &SearchOptions) -> Result<PaginatedList<SearchResult>, ApiError> {
        self.endpoint.send(Self::build_query(options)?).await
    }
}

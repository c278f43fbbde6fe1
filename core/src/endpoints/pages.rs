use super::Endpoint;
use crate::error::ApiError;
use crate::http::{to_params, HttpMethod, HttpRequest, Transport};
use crate::options::{CreatePage, RetrieveOptions, UpdatePage};
use crate::types::Page;

#[derive(Debug, Clone, Copy)]
pub struct PagesEndpoint<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> PagesEndpoint<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport),
        }
    }

    pub fn build_create(options: &CreatePage) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Post, "/pages")
            .with_body(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    pub fn build_retrieve(page_id: &str, options: &RetrieveOptions) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("pages/{page_id}")).with_auth(options.auth.as_deref())
    }

    pub fn build_update(page_id: &str, options: &UpdatePage) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Patch, format!("pages/{page_id}"))
            .with_body(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    pub async fn create(&self, options: &CreatePage) -> Result<Page, ApiError> {
        self.endpoint.send(Self::build_create(options)?).await
    }

    pub async fn retrieve(&self, page_id: &str, options: &RetrieveOptions) -> Result<Page, ApiError> {
        self.endpoint.send(Self::build_retrieve(page_id, options)).await
    }

    pub async fn update(&self, page_id: &str, options: &UpdatePage) -> Result<Page, ApiError> {
        self.endpoint.send(Self::build_update(page_id, options)?).await
    }
}

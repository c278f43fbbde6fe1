use super::Endpoint;
use crate::error::ApiError;
use crate::http::{to_params, HttpMethod, HttpRequest, Transport};
use crate::options::{ListOptions, RetrieveOptions};
use crate::types::{PaginatedList, User};

#[derive(Debug, Clone, Copy)]
pub struct UsersEndpoint<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> UsersEndpoint<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport),
        }
    }

    pub fn build_list(options: &ListOptions) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Get, "/users")
            .with_query(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    pub fn build_retrieve(user_id: &str, options: &RetrieveOptions) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("/users/{user_id}")).with_auth(options.auth.as_deref())
    }

    pub async fn list(&self, options: &ListOptions) -> Result<PaginatedList<User>, ApiError> {
        self.endpoint.send(Self::build_list(options)?).await
    }

    /// Fetch a user and decode it as a bot or a person according to its `type`.
    pub async fn retrieve(&self, user_id: &str, options: &RetrieveOptions) -> Result<User, ApiError> {
        let response = self.endpoint.send_raw(Self::build_retrieve(user_id, options)).await?;
        User::from_value(&response).inspect_err(|e| {
            log::warn!("user {user_id} could not be decoded: {e}");
        })
    }
}

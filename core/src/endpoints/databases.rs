use super::Endpoint;
use crate::error::ApiError;
use crate::http::{to_params, HttpMethod, HttpRequest, Transport};
use crate::options::{CreateDatabase, ListOptions, QueryDatabase, RetrieveOptions};
use crate::types::{Database, PaginatedList, Page};

#[derive(Debug, Clone, Copy)]
pub struct DatabasesEndpoint<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> DatabasesEndpoint<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport),
        }
    }

    pub fn build_create(options: &CreateDatabase) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Post, "/databases")
            .with_body(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    pub fn build_list(options: &ListOptions) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Get, "/databases")
            .with_query(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    pub fn build_query(database_id: &str, options: &QueryDatabase) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Post, format!("/databases/{database_id}/query"))
            .with_body(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    pub fn build_retrieve(database_id: &str, options: &RetrieveOptions) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("/databases/{database_id}"))
            .with_auth(options.auth.as_deref())
    }

    pub async fn create(&self, options: &CreateDatabase) -> Result<Database, ApiError> {
        self.endpoint.send(Self::build_create(options)?).await
    }

    pub async fn list(&self, options: &ListOptions) -> Result<PaginatedList<Database>, ApiError> {
        self.endpoint.send(Self::build_list(options)?).await
    }

    /// Query a database for pages. Returns one page of results; pass the
    /// returned cursor back as `start_cursor` for the next one.
    pub async fn query(&self, database_id: &str, options: &QueryDatabase) -> Result<PaginatedList<Page>, ApiError> {
        self.endpoint.send(Self::build_query(database_id, options)?).await
    }

    pub async fn retrieve(&self, database_id: &str, options: &RetrieveOptions) -> Result<Database, ApiError> {
        self.endpoint.send(Self::build_retrieve(database_id, options)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::endpoints::testing::RecordingTransport;
    use crate::types::Parent;

    fn database_reply() -> Value {
        json!({
            "object": "database",
            "id": "668d797c-76fa-4934-9b05-ad288df2d136",
            "created_time": "2021-07-08T23:50:00.000Z",
            "last_edited_time": "2021-07-08T23:50:00.000Z",
            "title": [{"type": "text", "plain_text": "Grocery List"}],
            "parent": {"type": "page_id", "page_id": "98ad959b-2b6a-4774-80ee-00246fb0ea9b"},
            "properties": {"Name": {"id": "title", "type": "title", "title": {}}}
        })
    }

    #[test]
    fn build_query_forwards_only_whitelisted_fields() {
        let options: QueryDatabase = serde_json::from_value(json!({
            "filter": {"property": "In stock", "checkbox": {"equals": true}},
            "sorts": [{"property": "Name", "direction": "ascending"}],
            "start_cursor": "c1",
            "page_size": 10,
            "archived": false,
            "children": []
        }))
        .unwrap();
        let req = DatabasesEndpoint::build_query("db1", &options).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/databases/db1/query");
        let body = Value::Object(req.body.unwrap());
        assert_eq!(
            body,
            json!({
                "filter": {"property": "In stock", "checkbox": {"equals": true}},
                "sorts": [{"property": "Name", "direction": "ascending"}],
                "start_cursor": "c1",
                "page_size": 10
            })
        );
        assert!(req.query.is_none());
    }

    #[test]
    fn build_query_with_no_options_sends_empty_body() {
        let req = DatabasesEndpoint::build_query("db1", &QueryDatabase::default()).unwrap();
        assert!(req.body.unwrap().is_empty());
    }

    #[test]
    fn build_create_sends_body() {
        let options = CreateDatabase {
            parent: Some(Parent::PageId {
                page_id: "98ad959b-2b6a-4774-80ee-00246fb0ea9b".parse().unwrap(),
            }),
            title: Some(vec![json!({"type": "text", "text": {"content": "Grocery List"}})]),
            properties: None,
            auth: None,
        };
        let req = DatabasesEndpoint::build_create(&options).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/databases");
        let body = req.body.unwrap();
        assert_eq!(body["parent"]["type"], "page_id");
        assert!(!body.contains_key("properties"));
    }

    #[test]
    fn build_retrieve_has_no_payload() {
        let req = DatabasesEndpoint::build_retrieve(
            "db1",
            &RetrieveOptions {
                auth: Some("secret_other".to_string()),
            },
        );
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/databases/db1");
        assert!(req.query.is_none());
        assert!(req.body.is_none());
        assert_eq!(req.auth.as_deref(), Some("secret_other"));
    }

    #[tokio::test]
    async fn query_decodes_pages_in_order() {
        let transport = RecordingTransport::replying(json!({
            "object": "list",
            "results": [
                {
                    "object": "page",
                    "id": "2e01e904-febd-43a0-ad02-8eedb903a82c",
                    "created_time": "2021-07-08T23:50:00.000Z",
                    "last_edited_time": "2021-07-08T23:50:00.000Z",
                    "parent": {"type": "database_id", "database_id": "668d797c-76fa-4934-9b05-ad288df2d136"},
                    "properties": {}
                },
                {
                    "object": "page",
                    "id": "4c2bd2a4-1d6c-4b4f-8f9a-1d7b4d8f0d11",
                    "created_time": "2021-07-08T23:51:00.000Z",
                    "last_edited_time": "2021-07-08T23:51:00.000Z",
                    "parent": {"type": "database_id", "database_id": "668d797c-76fa-4934-9b05-ad288df2d136"},
                    "properties": {}
                }
            ],
            "next_cursor": "4c2bd2a4-1d6c-4b4f-8f9a-1d7b4d8f0d11",
            "has_more": true
        }));
        let pages = DatabasesEndpoint::new(&transport)
            .query("db1", &QueryDatabase::default())
            .await
            .unwrap();
        let ids: Vec<String> = pages.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(
            ids,
            [
                "2e01e904-febd-43a0-ad02-8eedb903a82c",
                "4c2bd2a4-1d6c-4b4f-8f9a-1d7b4d8f0d11"
            ]
        );
        assert_eq!(pages.cursor(), Some("4c2bd2a4-1d6c-4b4f-8f9a-1d7b4d8f0d11"));
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn retrieve_decodes_database() {
        let transport = RecordingTransport::replying(database_reply());
        let db = DatabasesEndpoint::new(&transport)
            .retrieve("db1", &RetrieveOptions::default())
            .await
            .unwrap();
        assert_eq!(db.plain_title(), "Grocery List");
        assert!(matches!(db.parent, Some(Parent::PageId { .. })));
    }

    #[tokio::test]
    async fn list_decodes_databases() {
        let transport = RecordingTransport::replying(json!({
            "results": [database_reply()],
            "next_cursor": null,
            "has_more": false
        }));
        let list = DatabasesEndpoint::new(&transport)
            .list(&ListOptions {
                page_size: Some(1),
                ..ListOptions::default()
            })
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        let req = transport.last();
        assert_eq!(req.path, "/databases");
        assert_eq!(req.query.unwrap()["page_size"], 1);
    }

    #[tokio::test]
    async fn malformed_reply_is_a_deserialization_error() {
        let transport = RecordingTransport::replying(json!({"object": "database"}));
        let err = DatabasesEndpoint::new(&transport)
            .retrieve("db1", &RetrieveOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}

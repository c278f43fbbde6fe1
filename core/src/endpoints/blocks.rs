use super::Endpoint;
use crate::error::ApiError;
use crate::http::{to_params, HttpMethod, HttpRequest, Transport};
use crate::options::{AppendBlockChildren, ListOptions};
use crate::types::{Block, PaginatedList};

/// `blocks` resource. Child operations live under `children`.
#[derive(Debug, Clone, Copy)]
pub struct BlocksEndpoint<'a> {
    pub children: BlocksChildrenEndpoint<'a>,
}

impl<'a> BlocksEndpoint<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            children: BlocksChildrenEndpoint::new(transport),
        }
    }
}

/// `blocks/{id}/children`.
#[derive(Debug, Clone, Copy)]
pub struct BlocksChildrenEndpoint<'a> {
    endpoint: Endpoint<'a>,
}

impl<'a> BlocksChildrenEndpoint<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport),
        }
    }

    pub fn build_append(block_id: &str, options: &AppendBlockChildren) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Patch, format!("blocks/{block_id}/children"))
            .with_body(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    pub fn build_list(block_id: &str, options: &ListOptions) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Get, format!("blocks/{block_id}/children"))
            .with_query(to_params(options)?)
            .with_auth(options.auth.as_deref()))
    }

    /// Append children to a block and decode the returned block by its `type`.
    pub async fn append(&self, block_id: &str, options: &AppendBlockChildren) -> Result<Block, ApiError> {
        let response = self.endpoint.send_raw(Self::build_append(block_id, options)?).await?;
        Block::from_value(&response).inspect_err(|e| {
            log::warn!("append to block {block_id} returned an undecodable block: {e}");
        })
    }

    pub async fn list(&self, block_id: &str, options: &ListOptions) -> Result<PaginatedList<Block>, ApiError> {
        self.endpoint.send(Self::build_list(block_id, options)?).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::endpoints::testing::{FailingTransport, RecordingTransport};
    use crate::types::BlockType;

    fn paragraph_reply() -> serde_json::Value {
        json!({
            "object": "block",
            "id": "b55c9c91-384d-452b-81db-d1ef79372b75",
            "created_time": "2021-05-13T16:31:00.000Z",
            "last_edited_time": "2021-05-13T16:32:00.000Z",
            "has_children": true,
            "type": "paragraph",
            "paragraph": {"text": [{"type": "text", "plain_text": "parent"}]}
        })
    }

    #[test]
    fn build_append_produces_correct_request() {
        let options: AppendBlockChildren = serde_json::from_value(json!({
            "children": [{"object": "block", "type": "paragraph", "paragraph": {"text": []}}],
            "archived": true
        }))
        .unwrap();
        let req = BlocksChildrenEndpoint::build_append("b1", &options).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "blocks/b1/children");
        let body = req.body.unwrap();
        assert_eq!(body.keys().collect::<Vec<_>>(), ["children"]);
        assert!(req.query.is_none());
    }

    #[test]
    fn build_list_forwards_paging_as_query() {
        let options: ListOptions = serde_json::from_value(json!({
            "start_cursor": "c1",
            "page_size": 50,
            "filter": {"property": "x"}
        }))
        .unwrap();
        let req = BlocksChildrenEndpoint::build_list("b1", &options).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "blocks/b1/children");
        assert_eq!(
            serde_json::Value::Object(req.query.unwrap()),
            json!({"start_cursor": "c1", "page_size": 50})
        );
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn append_returns_matching_variant() {
        let transport = RecordingTransport::replying(paragraph_reply());
        let blocks = BlocksEndpoint::new(&transport);
        let block = blocks
            .children
            .append("b1", &AppendBlockChildren::default())
            .await
            .unwrap();
        assert_eq!(block.block_type(), BlockType::Paragraph);
        assert!(block.has_children);
        assert_eq!(transport.last().path, "blocks/b1/children");
    }

    #[tokio::test]
    async fn append_rejects_unknown_type() {
        let mut reply = paragraph_reply();
        reply["type"] = json!("synced_block");
        let transport = RecordingTransport::replying(reply);
        let err = BlocksEndpoint::new(&transport)
            .children
            .append("b1", &AppendBlockChildren::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnknownVariant { kind: "block", tag: Some(ref t) } if t == "synced_block"
        ));
    }

    #[tokio::test]
    async fn append_rejects_missing_type() {
        let mut reply = paragraph_reply();
        reply.as_object_mut().unwrap().remove("type");
        let transport = RecordingTransport::replying(reply);
        let err = BlocksEndpoint::new(&transport)
            .children
            .append("b1", &AppendBlockChildren::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownVariant { tag: None, .. }));
    }

    #[tokio::test]
    async fn list_decodes_each_block() {
        let transport = RecordingTransport::replying(json!({
            "object": "list",
            "results": [paragraph_reply()],
            "next_cursor": null,
            "has_more": false
        }));
        let page = BlocksEndpoint::new(&transport)
            .children
            .list("b1", &ListOptions::default())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.results[0].content.plain_text(), "parent");
        assert_eq!(page.cursor(), None);
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let err = BlocksEndpoint::new(&FailingTransport)
            .children
            .list("b1", &ListOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 401, .. }));
    }
}

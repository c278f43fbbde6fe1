//! In-memory stand-in for the Notion API, used by the core crate's live tests.
//!
//! Objects are stored as JSON values in insertion order. Filters and sorts in
//! database queries are accepted but not evaluated.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const PERSON_USER_ID: &str = "d40e767c-d7af-4b18-a86d-55c61f1e39a4";
pub const BOT_USER_ID: &str = "9a3b5ae0-c6e6-482d-b0e1-ed315ee6dc57";

#[derive(Default)]
pub struct Workspace {
    users: Vec<Value>,
    databases: Vec<Value>,
    pages: Vec<Value>,
    children: HashMap<Uuid, Vec<Value>>,
}

impl Workspace {
    /// A workspace with one person and one bot user.
    pub fn seeded() -> Self {
        Self {
            users: vec![
                json!({
                    "object": "user",
                    "id": PERSON_USER_ID,
                    "type": "person",
                    "name": "Avocado Lovelace",
                    "avatar_url": null,
                    "person": {"email": "avo@example.org"}
                }),
                json!({
                    "object": "user",
                    "id": BOT_USER_ID,
                    "type": "bot",
                    "name": "Doug Engelbot",
                    "avatar_url": null,
                    "bot": {}
                }),
            ],
            ..Self::default()
        }
    }

    fn find_block(&self, id: Uuid) -> Option<&Value> {
        self.children
            .values()
            .flatten()
            .find(|block| has_id(block, id))
    }
}

pub type Db = Arc<RwLock<Workspace>>;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Workspace::seeded()));
    let api = Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/databases", get(list_databases).post(create_database))
        .route("/databases/{id}", get(get_database))
        .route("/databases/{id}/query", post(query_database))
        .route("/pages", post(create_page))
        .route("/pages/{id}", get(get_page).patch(update_page))
        .route("/blocks/{id}/children", get(list_children).patch(append_children))
        .route("/search", post(search))
        .layer(middleware::from_fn(require_auth))
        .with_state(db);
    Router::new().nest("/v1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.is_empty());
    if !authorized {
        return api_error(StatusCode::UNAUTHORIZED, "unauthorized", "API token is invalid.")
            .into_response();
    }
    next.run(request).await
}

fn api_error(status: StatusCode, code: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "object": "error",
            "status": status.as_u16(),
            "code": code,
            "message": message
        })),
    )
}

fn not_found(id: Uuid) -> (StatusCode, Json<Value>) {
    api_error(
        StatusCode::NOT_FOUND,
        "object_not_found",
        &format!("Could not find object with ID: {id}."),
    )
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn has_id(value: &Value, id: Uuid) -> bool {
    value["id"].as_str().and_then(|s| s.parse::<Uuid>().ok()) == Some(id)
}

fn plain_title(value: &Value) -> String {
    let spans = if value["object"] == "database" {
        &value["title"]
    } else {
        value["properties"]
            .as_object()
            .and_then(|props| props.values().find(|p| p["type"] == "title"))
            .map(|p| &p["title"])
            .unwrap_or(&Value::Null)
    };
    spans
        .as_array()
        .map(|spans| {
            spans
                .iter()
                .filter_map(|s| s["plain_text"].as_str().or(s["text"]["content"].as_str()))
                .collect()
        })
        .unwrap_or_default()
}

/// Give rich text spans a `plain_text` field the way the API does.
fn with_plain_text(spans: &Value) -> Value {
    let spans = spans.as_array().cloned().unwrap_or_default();
    Value::Array(
        spans
            .into_iter()
            .map(|mut span| {
                if span["plain_text"].is_null() {
                    let text = span["text"]["content"].as_str().unwrap_or_default().to_string();
                    span["plain_text"] = json!(text);
                }
                if span["type"].is_null() {
                    span["type"] = json!("text");
                }
                span
            })
            .collect(),
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct Paging {
    pub start_cursor: Option<String>,
    pub page_size: Option<usize>,
}

/// Slice `items` into one list page. The cursor is the id of the first item
/// of the following page.
fn paginate(items: Vec<Value>, paging: &Paging) -> Value {
    let start = paging
        .start_cursor
        .as_deref()
        .and_then(|cursor| items.iter().position(|item| item["id"] == cursor))
        .unwrap_or(0);
    let size = paging.page_size.unwrap_or(100).clamp(1, 100);
    let end = (start + size).min(items.len());
    let next_cursor = items.get(end).map(|item| item["id"].clone()).unwrap_or(Value::Null);
    json!({
        "object": "list",
        "results": items[start..end],
        "next_cursor": next_cursor,
        "has_more": end < items.len()
    })
}

fn paging_from_body(body: &Value) -> Paging {
    Paging {
        start_cursor: body["start_cursor"].as_str().map(str::to_string),
        page_size: body["page_size"].as_u64().map(|n| n as usize),
    }
}

// --- users ---

async fn list_users(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Value> {
    let ws = db.read().await;
    Json(paginate(ws.users.clone(), &paging))
}

async fn get_user(State(db): State<Db>, Path(id): Path<Uuid>) -> ApiResult {
    let ws = db.read().await;
    ws.users
        .iter()
        .find(|u| has_id(u, id))
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

// --- databases ---

async fn list_databases(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Value> {
    let ws = db.read().await;
    Json(paginate(ws.databases.clone(), &paging))
}

async fn create_database(State(db): State<Db>, Json(input): Json<Value>) -> ApiResult {
    if input["parent"]["page_id"].is_null() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "body.parent.page_id should be defined.",
        ));
    }
    let id = Uuid::new_v4();
    let created = now();
    let database = json!({
        "object": "database",
        "id": id.to_string(),
        "created_time": created,
        "last_edited_time": created,
        "title": with_plain_text(&input["title"]),
        "parent": {"type": "page_id", "page_id": input["parent"]["page_id"]},
        "properties": input.get("properties").cloned().unwrap_or_else(|| json!({})),
        "url": format!("https://www.notion.so/{}", id.simple())
    });
    db.write().await.databases.push(database.clone());
    Ok(Json(database))
}

async fn get_database(State(db): State<Db>, Path(id): Path<Uuid>) -> ApiResult {
    let ws = db.read().await;
    ws.databases
        .iter()
        .find(|d| has_id(d, id))
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn query_database(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<Value>,
) -> ApiResult {
    let ws = db.read().await;
    if !ws.databases.iter().any(|d| has_id(d, id)) {
        return Err(not_found(id));
    }
    let rows: Vec<Value> = ws
        .pages
        .iter()
        .filter(|p| p["parent"]["database_id"].as_str().and_then(|s| s.parse::<Uuid>().ok()) == Some(id))
        .filter(|p| p["archived"] != true)
        .cloned()
        .collect();
    Ok(Json(paginate(rows, &paging_from_body(&input))))
}

// --- pages ---

async fn create_page(State(db): State<Db>, Json(input): Json<Value>) -> ApiResult {
    let parent = &input["parent"];
    let parent = if let Some(database_id) = parent["database_id"].as_str() {
        json!({"type": "database_id", "database_id": database_id})
    } else if let Some(page_id) = parent["page_id"].as_str() {
        json!({"type": "page_id", "page_id": page_id})
    } else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "body.parent should be defined.",
        ));
    };

    let id = Uuid::new_v4();
    let created = now();
    let mut properties = input.get("properties").cloned().unwrap_or_else(|| json!({}));
    if let Some(props) = properties.as_object_mut() {
        for prop in props.values_mut() {
            if prop["title"].is_array() {
                prop["type"] = json!("title");
                prop["title"] = with_plain_text(&prop["title"]);
            }
        }
    }
    let page = json!({
        "object": "page",
        "id": id.to_string(),
        "created_time": created,
        "last_edited_time": created,
        "archived": false,
        "parent": parent,
        "properties": properties,
        "url": format!("https://www.notion.so/{}", id.simple())
    });

    let mut ws = db.write().await;
    ws.pages.push(page.clone());
    if let Some(children) = input["children"].as_array() {
        let blocks = children.iter().map(new_block).collect();
        ws.children.insert(id, blocks);
    }
    Ok(Json(page))
}

async fn get_page(State(db): State<Db>, Path(id): Path<Uuid>) -> ApiResult {
    let ws = db.read().await;
    ws.pages
        .iter()
        .find(|p| has_id(p, id))
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn update_page(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<Value>,
) -> ApiResult {
    let mut ws = db.write().await;
    let page = ws
        .pages
        .iter_mut()
        .find(|p| has_id(p, id))
        .ok_or_else(|| not_found(id))?;
    if let Some(archived) = input["archived"].as_bool() {
        page["archived"] = json!(archived);
    }
    if let Some(props) = input["properties"].as_object() {
        for (name, value) in props {
            page["properties"][name] = value.clone();
        }
    }
    page["last_edited_time"] = json!(now());
    Ok(Json(page.clone()))
}

// --- blocks ---

fn new_block(input: &Value) -> Value {
    let created = now();
    let kind = input["type"].as_str().unwrap_or("unsupported").to_string();
    let mut content = input.get(&kind).cloned().unwrap_or_else(|| json!({}));
    for field in ["text", "rich_text"] {
        if let Some(spans) = content.get(field).cloned() {
            content[field] = with_plain_text(&spans);
        }
    }
    let mut block = json!({
        "object": "block",
        "id": Uuid::new_v4().to_string(),
        "created_time": created,
        "last_edited_time": created,
        "has_children": false,
        "archived": false,
        "type": kind
    });
    block[kind.as_str()] = content;
    block
}

async fn list_children(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let ws = db.read().await;
    let known = ws.children.contains_key(&id)
        || ws.pages.iter().any(|p| has_id(p, id))
        || ws.find_block(id).is_some();
    if !known {
        return Err(not_found(id));
    }
    let blocks = ws.children.get(&id).cloned().unwrap_or_default();
    Ok(Json(paginate(blocks, &paging)))
}

/// Append children and answer with the parent as a block: pages come back as
/// `child_page` blocks.
async fn append_children(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<Value>,
) -> ApiResult {
    let Some(children) = input["children"].as_array() else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "body.children should be defined.",
        ));
    };

    let mut ws = db.write().await;
    let parent = if let Some(page) = ws.pages.iter().find(|p| has_id(p, id)) {
        json!({
            "object": "block",
            "id": id.to_string(),
            "created_time": page["created_time"],
            "last_edited_time": now(),
            "has_children": true,
            "archived": page["archived"],
            "type": "child_page",
            "child_page": {"title": plain_title(page)}
        })
    } else if let Some(block) = ws.find_block(id) {
        let mut block = block.clone();
        block["has_children"] = json!(true);
        block
    } else {
        return Err(not_found(id));
    };

    let blocks: Vec<Value> = children.iter().map(new_block).collect();
    ws.children.entry(id).or_default().extend(blocks);
    Ok(Json(parent))
}

// --- search ---

async fn search(State(db): State<Db>, Json(input): Json<Value>) -> Json<Value> {
    let ws = db.read().await;
    let needle = input["query"].as_str().unwrap_or_default().to_lowercase();
    let only = match (&input["filter"]["property"], input["filter"]["value"].as_str()) {
        (Value::String(p), Some(v)) if p == "object" => Some(v.to_string()),
        _ => None,
    };
    let hits: Vec<Value> = ws
        .pages
        .iter()
        .chain(ws.databases.iter())
        .filter(|item| only.as_deref().is_none_or(|kind| item["object"] == kind))
        .filter(|item| needle.is_empty() || plain_title(item).to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Json(paginate(hits, &paging_from_body(&input)))
}

//! In-memory todo collection served over HTTP.
//!
//! Speaks the `/todo` contract the sync client expects: `GET /todo` answers
//! `{"data": [...]}` in insertion order and the server, not the client,
//! assigns ids.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{ApiError, ErrorResponse};

pub const WELCOME: &str = "Welcome to todo list API!";

const SEED: [&str; 2] = ["Read a book", "Code project AZ"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub item: String,
}

/// Payload for `POST /todo`. Any client supplied `id` is ignored.
#[derive(Deserialize)]
pub struct CreateItem {
    pub item: String,
}

#[derive(Deserialize)]
pub struct UpdateItem {
    pub item: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Added {
    pub message: String,
    pub data: Item,
}

#[derive(Debug)]
pub struct Store {
    items: Vec<Item>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn seeded() -> Self {
        let mut store = Self::new();
        for text in SEED {
            let id = store.allocate_id();
            store.items.push(Item {
                id,
                item: text.to_string(),
            });
        }
        store
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn insert(&mut self, text: &str) -> Result<Item, ApiError> {
        self.validate(text, None)?;
        let item = Item {
            id: self.allocate_id(),
            item: text.to_string(),
        };
        self.items.push(item.clone());
        Ok(item)
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }

    pub fn update(&mut self, id: &str, text: &str) -> Result<Item, ApiError> {
        if !self.items.iter().any(|t| t.id == id) {
            return Err(ApiError::NotFound(id.to_string()));
        }
        self.validate(text, Some(id))?;
        let todo = self
            .items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        todo.item = text.to_string();
        Ok(todo.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<Item, ApiError> {
        let pos = self
            .items
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        Ok(self.items.remove(pos))
    }

    /// Blank text is rejected, as is text matching another entry once trimmed
    /// and lowercased.
    fn validate(&self, text: &str, skip_id: Option<&str>) -> Result<(), ApiError> {
        let key = normalize(text);
        if key.is_empty() {
            return Err(ApiError::BlankItem);
        }
        let clash = self
            .items
            .iter()
            .filter(|t| Some(t.id.as_str()) != skip_id)
            .any(|t| normalize(&t.item) == key);
        if clash {
            return Err(ApiError::DuplicateItem);
        }
        Ok(())
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub type Db = Arc<RwLock<Store>>;

/// Empty store, no CORS. Used by tests.
pub fn app() -> Router {
    router(Store::new())
}

pub fn router(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/", get(root))
        .route("/todo", get(list_items).post(create_item))
        .route("/todo/{id}", put(update_item).delete(delete_item))
        .with_state(db)
}

/// Full application: optional seed data, CORS for the configured origins and
/// request tracing.
pub fn app_with(config: &Config) -> Router {
    let store = if config.seed {
        Store::seeded()
    } else {
        Store::new()
    };
    router(store)
        .layer(cors(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

fn cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping CORS origin {origin}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": WELCOME }))
}

async fn list_items(State(db): State<Db>) -> Json<Envelope<Vec<Item>>> {
    let store = db.read().await;
    Json(Envelope {
        data: store.items().to_vec(),
    })
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> Result<(StatusCode, Json<Added>), ApiError> {
    let item = db.write().await.insert(&input.item)?;
    info!(id = %item.id, "todo added");
    Ok((
        StatusCode::CREATED,
        Json(Added {
            message: "Todo added".to_string(),
            data: item,
        }),
    ))
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateItem>,
) -> Result<Json<Envelope<Item>>, ApiError> {
    let item = db.write().await.update(&id, &input.item)?;
    Ok(Json(Envelope { data: item }))
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = db.write().await.remove(&id)?;
    info!(id = %removed.id, "todo removed");
    Ok(StatusCode::NO_CONTENT)
}

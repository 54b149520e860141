//! # In-Memory Store
//!
//! A resource-oriented store that lives inside the process, with the same wire behaviour as a
//! json-server style HTTP store. It backs the demo binary when no real store is available and the
//! end-to-end tests.
//!
//! The store is an actor: [`MemoryStore`] owns every collection and processes requests
//! *sequentially* in [`MemoryStore::run`], while [`MemoryTransport`] is the cheap, cloneable
//! client half that forwards [`WireRequest`]s over a channel. No locks guard the collections.
//!
//! ```rust
//! use catalog_sync::framework::{MemoryStore, RequestExecutor};
//! use serde_json::{json, Value};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, transport) = MemoryStore::new(16);
//!     tokio::spawn(store.run());
//!
//!     let executor = RequestExecutor::new(transport);
//!     let created: Value = executor.create("products", &json!({ "name": "Cable" })).await.unwrap();
//!     assert_eq!(created["id"], json!(1));
//! }
//! ```

use crate::framework::error::SyncError;
use crate::framework::message::{Method, Response, WireRequest, WireResponse};
use crate::framework::transport::Transport;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// A request travelling from a [`MemoryTransport`] to its [`MemoryStore`].
#[derive(Debug)]
pub struct StoreRequest {
    pub request: WireRequest,
    pub respond_to: Response<WireResponse>,
}

/// The server half: owns the collections and answers requests one at a time.
pub struct MemoryStore {
    receiver: mpsc::Receiver<StoreRequest>,
    collections: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    /// Creates a store and its transport.
    ///
    /// `buffer_size` is the channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, MemoryTransport) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            collections: HashMap::new(),
        };
        (store, MemoryTransport { sender })
    }

    /// Replaces the contents of `collection` before the store starts.
    pub fn seed(mut self, collection: &str, records: Vec<Value>) -> Self {
        self.collections.insert(collection.to_string(), records);
        self
    }

    /// Runs the store's event loop until every transport has been dropped.
    pub async fn run(mut self) {
        info!(collections = self.collections.len(), "Store started");

        while let Some(StoreRequest { request, respond_to }) = self.receiver.recv().await {
            let response = self.handle(request);
            let _ = respond_to.send(Ok(response));
        }

        info!(collections = self.collections.len(), "Shutdown");
    }

    fn handle(&mut self, request: WireRequest) -> WireResponse {
        let WireRequest {
            method,
            collection,
            id,
            body,
        } = request;

        match (method, id) {
            (Method::Get, None) => self.list(&collection),
            (Method::Get, Some(id)) => self.get(&collection, &id),
            (Method::Post, None) => self.create(&collection, body),
            (Method::Patch, Some(id)) => self.update(&collection, &id, body),
            (Method::Delete, Some(id)) => self.remove(&collection, &id),
            (method, id) => {
                warn!(%method, collection = %collection, ?id, "Unsupported route");
                WireResponse::status(405)
            }
        }
    }

    fn list(&self, collection: &str) -> WireResponse {
        match self.collections.get(collection) {
            Some(records) => {
                debug!(collection, size = records.len(), "List");
                WireResponse::ok(Value::Array(records.clone()))
            }
            None => {
                warn!(collection, "Unknown collection");
                WireResponse::status(404)
            }
        }
    }

    fn get(&self, collection: &str, id: &str) -> WireResponse {
        let found = self
            .collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| id_matches(r, id)));
        debug!(collection, id, found = found.is_some(), "Get");
        match found {
            Some(record) => WireResponse::ok(record.clone()),
            None => WireResponse::status(404),
        }
    }

    fn create(&mut self, collection: &str, body: Option<Value>) -> WireResponse {
        let Some(Value::Object(mut fields)) = body else {
            warn!(collection, "Create without an object body");
            return WireResponse::status(400);
        };

        let records = self.collections.entry(collection.to_string()).or_default();
        match fields.get("id") {
            Some(id) => {
                let id = id_text(id);
                if records.iter().any(|r| id_matches(r, &id)) {
                    warn!(collection, id = %id, "Duplicate id");
                    return WireResponse::status(409);
                }
            }
            None => {
                fields.insert("id".to_string(), json!(next_id(records)));
            }
        }

        let record = Value::Object(fields);
        records.push(record.clone());
        info!(collection, id = %id_text(&record["id"]), size = records.len(), "Created");
        WireResponse::new(201, Some(record))
    }

    fn update(&mut self, collection: &str, id: &str, body: Option<Value>) -> WireResponse {
        let Some(Value::Object(patch)) = body else {
            warn!(collection, id, "Update without an object body");
            return WireResponse::status(400);
        };

        let record = self
            .collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| id_matches(r, id)));
        let Some(Value::Object(fields)) = record else {
            warn!(collection, id, "Not found");
            return WireResponse::status(404);
        };

        merge(fields, patch);
        info!(collection, id, "Updated");
        WireResponse::ok(Value::Object(fields.clone()))
    }

    fn remove(&mut self, collection: &str, id: &str) -> WireResponse {
        let Some(records) = self.collections.get_mut(collection) else {
            warn!(collection, id, "Unknown collection");
            return WireResponse::status(404);
        };
        let Some(index) = records.iter().position(|r| id_matches(r, id)) else {
            warn!(collection, id, "Not found");
            return WireResponse::status(404);
        };

        records.remove(index);
        info!(collection, id, size = records.len(), "Deleted");
        WireResponse::ok(json!({}))
    }
}

/// Shallow merge; the identifier is immutable.
fn merge(fields: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if key != "id" {
            fields.insert(key, value);
        }
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn id_matches(record: &Value, id: &str) -> bool {
    record.get("id").map(id_text).as_deref() == Some(id)
}

/// One past the largest id, counting text ids that hold a number.
fn next_id(records: &[Value]) -> u64 {
    records
        .iter()
        .filter_map(|r| r.get("id"))
        .filter_map(|id| match id {
            Value::String(text) => text.parse::<u64>().ok(),
            other => other.as_u64(),
        })
        .max()
        .unwrap_or(0)
        + 1
}

/// The client half of a [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryTransport {
    sender: mpsc::Sender<StoreRequest>,
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, SyncError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest { request, respond_to })
            .await
            .map_err(|_| SyncError::Transport("Store closed".to_string()))?;
        response
            .await
            .map_err(|_| SyncError::Transport("Store dropped response channel".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_seeded() -> MemoryTransport {
        let (store, transport) = MemoryStore::new(8);
        let store = store.seed(
            "products",
            vec![json!({ "id": 1, "name": "X" }), json!({ "id": 2, "name": "Y" })],
        );
        tokio::spawn(store.run());
        transport
    }

    #[tokio::test]
    async fn create_assigns_next_numeric_id() {
        let transport = spawn_seeded();
        let response = transport
            .send(WireRequest::create("products", json!({ "name": "Z" })))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, Some(json!({ "id": 3, "name": "Z" })));

        let listed = transport.send(WireRequest::list("products")).await.unwrap();
        assert_eq!(listed.body.unwrap().as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn numeric_text_ids_count_towards_next_id() {
        let (store, transport) = MemoryStore::new(8);
        let store = store.seed("products", vec![json!({ "id": "1", "name": "X" })]);
        tokio::spawn(store.run());

        let response = transport
            .send(WireRequest::create("products", json!({ "name": "Y" })))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, Some(json!({ "id": 2, "name": "Y" })));

        let first = transport.send(WireRequest::get("products", 1)).await.unwrap();
        assert_eq!(first.body, Some(json!({ "id": "1", "name": "X" })));
    }

    #[tokio::test]
    async fn update_merges_fields_and_keeps_id() {
        let transport = spawn_seeded();
        let response = transport
            .send(WireRequest::update("products", 2, json!({ "id": 99, "price": 5 })))
            .await
            .unwrap();
        assert_eq!(response.body, Some(json!({ "id": 2, "name": "Y", "price": 5 })));
    }

    #[tokio::test]
    async fn missing_records_are_404() {
        let transport = spawn_seeded();
        for request in [
            WireRequest::get("products", 7),
            WireRequest::update("products", 7, json!({})),
            WireRequest::remove("products", 7),
            WireRequest::list("orders"),
        ] {
            let response = transport.send(request).await.unwrap();
            assert_eq!(response.status, 404);
        }
    }

    #[tokio::test]
    async fn remove_then_get_is_404() {
        let transport = spawn_seeded();
        let removed = transport.send(WireRequest::remove("products", 1)).await.unwrap();
        assert!(removed.is_success());

        let again = transport.send(WireRequest::get("products", 1)).await.unwrap();
        assert_eq!(again.status, 404);
    }

    #[tokio::test]
    async fn text_ids_match_by_value() {
        let (store, transport) = MemoryStore::new(8);
        tokio::spawn(store.seed("store_info", vec![json!({ "id": "main", "name": "Shop" })]).run());

        let response = transport.send(WireRequest::get("store_info", "main")).await.unwrap();
        assert_eq!(response.body.unwrap()["name"], json!("Shop"));
    }

    #[tokio::test]
    async fn closed_store_is_a_transport_failure() {
        let (store, transport) = MemoryStore::new(1);
        drop(store);
        let result = transport.send(WireRequest::list("products")).await;
        assert_eq!(result, Err(SyncError::Transport("Store closed".into())));
    }
}

//! # Wire Messages
//!
//! This module defines the request/response pair exchanged between the
//! [`RequestExecutor`](crate::framework::RequestExecutor) and a
//! [`Transport`](crate::framework::Transport).
//!
//! # The CRUD Pattern
//! The remote store is resource-oriented: every operation is one of five verbs applied to a
//! named collection, optionally narrowed to one record by identifier.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | list      | GET    | `/{collection}` |
//! | get       | GET    | `/{collection}/{id}` |
//! | create    | POST   | `/{collection}` |
//! | update    | PATCH  | `/{collection}/{id}` |
//! | remove    | DELETE | `/{collection}/{id}` |

use crate::framework::error::SyncError;
use serde_json::Value;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by in-process stores.
pub type Response<T> = oneshot::Sender<Result<T, SyncError>>;

/// HTTP verbs understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// A request addressed to one collection, or to one record inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: Method,
    pub collection: String,
    pub id: Option<String>,
    pub body: Option<Value>,
}

impl WireRequest {
    pub fn list(collection: &str) -> Self {
        Self { method: Method::Get, collection: collection.to_string(), id: None, body: None }
    }

    pub fn get(collection: &str, id: impl ToString) -> Self {
        Self {
            method: Method::Get,
            collection: collection.to_string(),
            id: Some(id.to_string()),
            body: None,
        }
    }

    pub fn create(collection: &str, body: Value) -> Self {
        Self {
            method: Method::Post,
            collection: collection.to_string(),
            id: None,
            body: Some(body),
        }
    }

    pub fn update(collection: &str, id: impl ToString, body: Value) -> Self {
        Self {
            method: Method::Patch,
            collection: collection.to_string(),
            id: Some(id.to_string()),
            body: Some(body),
        }
    }

    pub fn remove(collection: &str, id: impl ToString) -> Self {
        Self {
            method: Method::Delete,
            collection: collection.to_string(),
            id: Some(id.to_string()),
            body: None,
        }
    }

    /// The request path relative to the store's base address.
    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("/{}/{}", self.collection, id),
            None => format!("/{}", self.collection),
        }
    }
}

/// What the store answered: a status code and, possibly, a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl WireResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, Some(body))
    }

    pub fn status(status: u16) -> Self {
        Self::new(status, None)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

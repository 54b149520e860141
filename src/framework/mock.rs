//! # Mock Transport
//!
//! Utilities for testing executors, clients and the catalog engine without a running store.
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. You queue the requests you
//! expect, in order, together with what the "store" should answer. Every request that arrives is
//! checked against the next expectation and recorded for later inspection.
//!
//! ## When to use the mock vs the in-memory store
//!
//! | Feature | MockTransport | MemoryStore |
//! |---------|---------------|-------------|
//! | **State** | None (scripted answers) | Real collections |
//! | **Error Injection** | Easy (`return_status`, `return_transport_error`) | Only 404s |
//! | **Use Case** | Unit testing logic *around* the executor | End-to-end flows |
//!
//! ## Example
//!
//! ```rust
//! use catalog_sync::framework::mock::MockTransport;
//! use catalog_sync::framework::{RequestExecutor, SyncError};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_list("products").return_json(json!([{ "id": 1 }]));
//!     mock.expect_get("products", 9).return_status(404);
//!
//!     let executor = RequestExecutor::new(mock.clone());
//!     let rows: Vec<serde_json::Value> = executor.list("products").await.unwrap();
//!     assert_eq!(rows.len(), 1);
//!
//!     let missing = executor.get::<serde_json::Value, _>("products", &9).await;
//!     assert_eq!(missing, Err(SyncError::Protocol { status: 404 }));
//!
//!     mock.verify();
//! }
//! ```

use crate::framework::error::SyncError;
use crate::framework::message::{Method, WireRequest, WireResponse};
use crate::framework::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// An expected request and the scripted answer for it.
struct Expectation {
    method: Method,
    path: String,
    outcome: Result<WireResponse, SyncError>,
}

/// A scripted transport with expectation tracking for fluent testing.
///
/// Cloning yields another handle to the same expectation queue, so a test can keep one handle
/// while the executor owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<WireRequest>>>,
}

impl MockTransport {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list` of `collection`.
    pub fn expect_list(&self, collection: &str) -> ExpectationBuilder {
        self.expect(Method::Get, format!("/{}", collection))
    }

    /// Expects a `get` of one record.
    pub fn expect_get(&self, collection: &str, id: impl ToString) -> ExpectationBuilder {
        self.expect(Method::Get, format!("/{}/{}", collection, id.to_string()))
    }

    /// Expects a `create` in `collection`.
    pub fn expect_create(&self, collection: &str) -> ExpectationBuilder {
        self.expect(Method::Post, format!("/{}", collection))
    }

    /// Expects an `update` of one record.
    pub fn expect_update(&self, collection: &str, id: impl ToString) -> ExpectationBuilder {
        self.expect(Method::Patch, format!("/{}/{}", collection, id.to_string()))
    }

    /// Expects a `remove` of one record.
    pub fn expect_remove(&self, collection: &str, id: impl ToString) -> ExpectationBuilder {
        self.expect(Method::Delete, format!("/{}/{}", collection, id.to_string()))
    }

    fn expect(&self, method: Method, path: String) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path,
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of expectations not consumed yet.
    pub fn pending(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.pending();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, SyncError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        let path = request.path();
        let method = request.method;
        self.requests.lock().unwrap().push(request);

        match expectation {
            Some(exp) if exp.method == method && exp.path == path => exp.outcome,
            Some(exp) => panic!(
                "Unexpected request {} {} (expected {} {})",
                method, path, exp.method, exp.path
            ),
            None => panic!("Unexpected request {} {} (no expectations left)", method, path),
        }
    }
}

/// Builder that completes one expectation with its scripted answer.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Answers with a success status and the given JSON body.
    ///
    /// The status is `201` for `create` and `200` otherwise, like json-server.
    pub fn return_json(self, body: Value) {
        let status = if self.method == Method::Post { 201 } else { 200 };
        self.respond(WireResponse::new(status, Some(body)));
    }

    /// Answers with a bare status code and no body.
    pub fn return_status(self, status: u16) {
        self.respond(WireResponse::status(status));
    }

    /// Fails as if the store could not be reached.
    pub fn return_transport_error(self, message: &str) {
        self.push(Err(SyncError::Transport(message.to_string())));
    }

    /// Answers with an arbitrary response.
    pub fn respond(self, response: WireResponse) {
        self.push(Ok(response));
    }

    fn push(self, outcome: Result<WireResponse, SyncError>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            method: self.method,
            path: self.path,
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn answers_in_order_and_records_requests() {
        let mock = MockTransport::new();
        mock.expect_create("products").return_json(json!({ "id": 1 }));
        mock.expect_remove("products", 1).return_status(200);

        let created = mock
            .send(WireRequest::create("products", json!({ "name": "X" })))
            .await
            .unwrap();
        assert_eq!(created.status, 201);
        assert_eq!(created.body, Some(json!({ "id": 1 })));

        let removed = mock.send(WireRequest::remove("products", 1)).await.unwrap();
        assert_eq!(removed, WireResponse::status(200));

        let seen = mock.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].body, Some(json!({ "name": "X" })));
        mock.verify();
    }

    #[tokio::test]
    async fn transport_errors_are_scripted() {
        let mock = MockTransport::new();
        mock.expect_list("products").return_transport_error("connection refused");

        let result = mock.send(WireRequest::list("products")).await;
        assert_eq!(result, Err(SyncError::Transport("connection refused".into())));
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn mismatched_request_panics() {
        let mock = MockTransport::new();
        mock.expect_list("products").return_json(json!([]));
        let _ = mock.send(WireRequest::list("store_info")).await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn verify_reports_leftovers() {
        let mock = MockTransport::new();
        mock.expect_list("products").return_json(json!([]));
        mock.verify();
    }
}

//! # Request Executor
//!
//! The single gateway between the rest of the crate and the remote store.
//!
//! Every operation follows the same sequence:
//!
//! 1. mark the call in flight (`loading` becomes true) and clear the previous error,
//! 2. hand the request to the [`Transport`],
//! 3. turn non-2xx answers into [`SyncError::Protocol`] and decode the body,
//! 4. on failure, store the error message in the shared [`RequestState`],
//! 5. settle the call (`loading` drops back once nothing else is in flight).
//!
//! Step 5 is tied to a drop guard, so it also runs when the future is dropped before completion.
//! The outcome is returned to the caller as well: observers that only render status read the
//! shared state, callers that must react (e.g. keep an edit session open) match on the `Result`.

use crate::framework::error::SyncError;
use crate::framework::message::WireRequest;
use crate::framework::state::{RequestState, StateSnapshot};
use crate::framework::transport::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Typed CRUD gateway over named collections.
///
/// Cheap to clone; clones share the transport and the [`RequestState`].
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    state: RequestState,
}

impl RequestExecutor {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_arc(Arc::new(transport))
    }

    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            state: RequestState::new(),
        }
    }

    /// Handle to the shared busy/error state.
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Fetches every record of `collection`.
    pub async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, SyncError> {
        self.call(Ok(WireRequest::list(collection)), decode).await
    }

    /// Fetches one record. A missing record surfaces as `Protocol { status: 404 }`.
    pub async fn get<T, I>(&self, collection: &str, id: &I) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
        I: Display + ?Sized,
    {
        self.call(Ok(WireRequest::get(collection, id)), decode).await
    }

    /// Submits a new record and returns what the store kept (including its assigned id).
    pub async fn create<T, P>(&self, collection: &str, payload: &P) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let request = serde_json::to_value(payload)
            .map(|body| WireRequest::create(collection, body))
            .map_err(SyncError::from);
        self.call(request, decode).await
    }

    /// Applies a partial update; only fields present in `patch` change.
    pub async fn update<T, I, P>(&self, collection: &str, id: &I, patch: &P) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
        I: Display + ?Sized,
        P: Serialize + ?Sized,
    {
        let request = serde_json::to_value(patch)
            .map(|body| WireRequest::update(collection, id, body))
            .map_err(SyncError::from);
        self.call(request, decode).await
    }

    /// Deletes one record. Deleting an already-removed record reports the store's status.
    pub async fn remove<I>(&self, collection: &str, id: &I) -> Result<(), SyncError>
    where
        I: Display + ?Sized,
    {
        self.call(Ok(WireRequest::remove(collection, id)), |_| Ok(())).await
    }

    async fn call<T>(
        &self,
        request: Result<WireRequest, SyncError>,
        decode: impl FnOnce(Option<Value>) -> Result<T, SyncError>,
    ) -> Result<T, SyncError> {
        let _in_flight = self.state.begin();

        let result = match request {
            Ok(request) => self.round_trip(request).await.and_then(decode),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            self.state.record_error(e.to_string());
        }
        result
    }

    async fn round_trip(&self, request: WireRequest) -> Result<Option<Value>, SyncError> {
        let method = request.method;
        let path = request.path();
        debug!(%method, %path, body = ?request.body, "Sending request");

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                info!(%method, %path, status = response.status, "Request ok");
                Ok(response.body)
            }
            Ok(response) => {
                warn!(%method, %path, status = response.status, "Request rejected");
                Err(SyncError::Protocol {
                    status: response.status,
                })
            }
            Err(e) => {
                warn!(%method, %path, error = %e, "Request failed");
                Err(e)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T, SyncError> {
    Ok(serde_json::from_value(body.unwrap_or(Value::Null))?)
}

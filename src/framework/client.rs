//! # Generic Client
//!
//! This module defines the typed client for one collection of the store.

use crate::framework::error::SyncError;
use crate::framework::executor::RequestExecutor;
use crate::framework::record::{Record, WritableRecord};
use std::marker::PhantomData;

/// ## ResourceClient
///
/// A type-safe view of one collection, built on a shared [`RequestExecutor`].
///
/// * **Cloneable** – holds only an executor handle, so cloning is inexpensive, and every clone
///   reports into the same loading/error state.
/// * **Generic** – works with any [`Record`]; create and update are only available for a
///   [`WritableRecord`].
pub struct ResourceClient<R> {
    executor: RequestExecutor,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.executor.clone())
    }
}

impl<R> ResourceClient<R> {
    pub fn new(executor: RequestExecutor) -> Self {
        Self {
            executor,
            _record: PhantomData,
        }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}

impl<R: Record> ResourceClient<R> {
    pub async fn list(&self) -> Result<Vec<R>, SyncError> {
        self.executor.list(R::COLLECTION).await
    }

    pub async fn get(&self, id: &R::Id) -> Result<R, SyncError> {
        self.executor.get(R::COLLECTION, id).await
    }

    pub async fn delete(&self, id: &R::Id) -> Result<(), SyncError> {
        self.executor.remove(R::COLLECTION, id).await
    }
}

impl<R: WritableRecord> ResourceClient<R> {
    pub async fn create(&self, params: &R::Create) -> Result<R, SyncError> {
        self.executor.create(R::COLLECTION, params).await
    }

    pub async fn update(&self, id: &R::Id, update: &R::Update) -> Result<R, SyncError> {
        self.executor.update(R::COLLECTION, id, update).await
    }
}

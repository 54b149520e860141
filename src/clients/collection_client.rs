//! # CollectionClient Trait
//!
//! Provides a common interface for collection-specific clients, adding default `list`, `get`
//! and `delete` methods built on top of a generic [`ResourceClient`].
use crate::framework::{Record, ResourceClient, SyncError};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard read/delete operations.
///
/// Implementors only provide [`inner`](CollectionClient::inner); domain-specific operations
/// (validated creation, typed patches) live on the implementing type.
#[async_trait]
pub trait CollectionClient<R: Record>: Send + Sync {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<R>;

    /// Fetch every record of the collection.
    #[tracing::instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn list(&self) -> Result<Vec<R>, SyncError> {
        tracing::debug!("Sending request");
        self.inner().list().await
    }

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn get(&self, id: R::Id) -> Result<R, SyncError> {
        tracing::debug!("Sending request");
        self.inner().get(&id).await
    }

    /// Delete a record by ID.
    #[tracing::instrument(skip(self), fields(collection = R::COLLECTION))]
    async fn delete(&self, id: R::Id) -> Result<(), SyncError> {
        tracing::debug!("Sending request");
        self.inner().delete(&id).await
    }
}

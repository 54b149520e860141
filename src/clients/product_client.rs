//! # Product Client
//!
//! Provides a high-level API for the `products` collection.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods.
use crate::clients::collection_client::CollectionClient;
use crate::framework::{RequestExecutor, ResourceClient, SyncError};
use crate::model::{Product, ProductDraft, ProductId, ProductPatch};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Client for the `products` collection.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    pub fn from_executor(executor: RequestExecutor) -> Self {
        Self::new(ResourceClient::new(executor))
    }

    pub fn executor(&self) -> &RequestExecutor {
        self.inner.executor()
    }
}

#[async_trait]
impl CollectionClient<Product> for ProductClient {
    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }
}

impl ProductClient {
    /// Validate the draft, then submit it.
    ///
    /// Returns the stored product, including the id the store assigned. An invalid draft fails
    /// with [`SyncError::Validation`] before anything is sent.
    #[instrument(skip(self))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, SyncError> {
        if let Err(e) = draft.validate() {
            warn!(error = %e, "Draft rejected");
            return Err(e);
        }
        debug!("Sending request");
        self.inner.create(&draft).await
    }

    /// Apply a partial update and return the resulting full record.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, SyncError> {
        debug!("Sending request");
        self.inner.update(&id, &patch).await
    }
}

use crate::clients::collection_client::CollectionClient;
use crate::framework::{RequestExecutor, ResourceClient, SyncError};
use crate::model::StoreInfo;
use async_trait::async_trait;
use tracing::instrument;

/// Client for the read-only `store_info` collection.
#[derive(Clone)]
pub struct StoreInfoClient {
    inner: ResourceClient<StoreInfo>,
}

impl StoreInfoClient {
    pub fn new(inner: ResourceClient<StoreInfo>) -> Self {
        Self { inner }
    }

    pub fn from_executor(executor: RequestExecutor) -> Self {
        Self::new(ResourceClient::new(executor))
    }

    /// The operator record: the first element of the collection, if there is one.
    #[instrument(skip(self))]
    pub async fn store_info(&self) -> Result<Option<StoreInfo>, SyncError> {
        Ok(self.inner.list().await?.into_iter().next())
    }
}

#[async_trait]
impl CollectionClient<StoreInfo> for StoreInfoClient {
    fn inner(&self) -> &ResourceClient<StoreInfo> {
        &self.inner
    }
}

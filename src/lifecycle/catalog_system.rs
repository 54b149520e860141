use crate::catalog::CatalogEngine;
use crate::clients::{ProductClient, StoreInfoClient};
use crate::framework::{HttpTransport, MemoryStore, Record, RequestExecutor};
use crate::lifecycle::config::SyncConfig;
use crate::lifecycle::seed;
use crate::model::{Product, StoreInfo};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Channel capacity of the in-memory store.
const STORE_BUFFER: usize = 32;

/// Wires a transport, one shared executor, the clients and the engine together.
///
/// # Example
///
/// ```ignore
/// let config = SyncConfig::from_env()?;
/// let mut system = CatalogSystem::from_config(&config);
///
/// system.engine.refresh().await?;
/// let info = system.store_info.store_info().await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Snapshot, view and edit session over `products`
    pub engine: CatalogEngine,

    /// Client for the `store_info` singleton
    pub store_info: StoreInfoClient,

    /// In-memory store task, if one is running
    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Offline configs get the seeded in-memory store, everything else goes over HTTP.
    pub fn from_config(config: &SyncConfig) -> Self {
        if config.offline {
            Self::in_memory(seed::demo_products(), seed::demo_store_info())
        } else {
            Self::connect(config)
        }
    }

    /// Talks to the store at `config.base_url`.
    pub fn connect(config: &SyncConfig) -> Self {
        info!(base_url = %config.base_url, "Connecting to store");
        let executor = RequestExecutor::new(HttpTransport::new(config.base_url.clone()));
        Self::wire(executor, Vec::new())
    }

    /// Spawns an in-memory store holding the given records. Must be called inside a runtime.
    pub fn in_memory(products: Vec<Value>, store_info: Vec<Value>) -> Self {
        let (store, transport) = MemoryStore::new(STORE_BUFFER);
        let store = store
            .seed(Product::COLLECTION, products)
            .seed(StoreInfo::COLLECTION, store_info);
        let handle = tokio::spawn(store.run());

        Self::wire(RequestExecutor::new(transport), vec![handle])
    }

    fn wire(executor: RequestExecutor, handles: Vec<JoinHandle<()>>) -> Self {
        Self {
            engine: CatalogEngine::new(ProductClient::from_executor(executor.clone())),
            store_info: StoreInfoClient::from_executor(executor),
            handles,
        }
    }

    /// Drops every client and waits for the in-memory store, if any, to stop.
    ///
    /// The store only stops once every clone of its transport is gone, so clients cloned out of
    /// the system must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down...");

        drop(self.engine);
        drop(self.store_info);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_config_runs_seeded_store() {
        let config = SyncConfig::default().offline(true);
        let mut system = CatalogSystem::from_config(&config);

        let loaded = system.engine.refresh().await.unwrap();
        assert_eq!(loaded, seed::demo_products().len());

        let info = system.store_info.store_info().await.unwrap().unwrap();
        assert_eq!(info.name, "TechGear Pro");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn clients_share_request_state() {
        let config = SyncConfig::new("http://127.0.0.1:1").unwrap();
        let system = CatalogSystem::connect(&config);

        assert!(system.store_info.store_info().await.is_err());
        let status = system.engine.status();
        assert!(!status.loading);
        assert!(status.error.is_some());

        system.shutdown().await.unwrap();
    }
}

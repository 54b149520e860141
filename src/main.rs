//! Demo binary: load the catalog, show the dashboard numbers, filter, edit and commit.

use catalog_sync::catalog::summary::LOW_STOCK_THRESHOLD;
use catalog_sync::catalog::{CatalogError, FilterCriteria};
use catalog_sync::lifecycle::{setup_tracing, CatalogSystem, SyncConfig};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = SyncConfig::from_env().map_err(|e| e.to_string())?;
    info!(base_url = %config.base_url, offline = config.offline, "Starting catalog sync");

    let mut system = CatalogSystem::from_config(&config);

    let span = tracing::info_span!("initial_load");
    let loaded = async { system.engine.refresh().await }
        .instrument(span)
        .await;
    if let Err(e) = loaded {
        error!(error = %e, "Could not load catalog");
        system.shutdown().await?;
        return Err(e.to_string());
    }

    match system.store_info.store_info().await {
        Ok(Some(store)) => info!(name = %store.name, phone = %store.phone, "Store"),
        Ok(None) => warn!("No store info"),
        Err(e) => warn!(error = %e, "Store info unavailable"),
    }

    let summary = system.engine.summary();
    info!(
        total = summary.total,
        low_stock = summary.low_stock,
        featured = summary.featured.len(),
        "Dashboard"
    );
    info!(categories = ?system.engine.categories(), "Categories");

    system
        .engine
        .set_criteria(FilterCriteria::default().with_price_range(0.0, 100.0));
    for product in system.engine.view() {
        info!(id = %product.id, name = %product.name, price = product.price, "Under 100");
    }

    // Restock the first low-stock product
    let low = system
        .engine
        .snapshot()
        .iter()
        .find(|p| p.stock < LOW_STOCK_THRESHOLD)
        .map(|p| p.id.clone());
    if let Some(id) = low {
        let span = tracing::info_span!("restock", %id);
        let committed: Result<_, CatalogError> = async {
            system.engine.begin_edit(&id)?;
            system.engine.edit(|p| p.stock += 25)?;
            system.engine.commit_edit().await
        }
        .instrument(span)
        .await;

        match committed {
            Ok(product) => info!(id = %product.id, stock = product.stock, "Restocked"),
            Err(e) => error!(error = %e, "Restock failed"),
        }
    }

    system.shutdown().await?;
    info!("Done");
    Ok(())
}

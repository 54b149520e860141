//! # Catalog Engine
//!
//! Owns the locally held snapshot of the `products` collection and everything derived from it:
//! the filtered view, the category set, the edit session and the set of products whose image
//! failed to load.
//!
//! Every successful write (create, commit, delete) is followed by a full [`refresh`]; the
//! snapshot is never patched locally. A failed call leaves the snapshot and any edit session
//! exactly as they were.
//!
//! Once the store has accepted a write, the write method returns `Ok` even if the follow-up
//! refresh fails. That failure only shows up in [`status`] and the snapshot stays stale until
//! the next successful refresh.
//!
//! [`refresh`]: CatalogEngine::refresh
//! [`status`]: CatalogEngine::status

use crate::catalog::edit::EditSession;
use crate::catalog::error::CatalogError;
use crate::catalog::filter::{self, FilterCriteria};
use crate::catalog::summary::CatalogSummary;
use crate::clients::{CollectionClient, ProductClient};
use crate::framework::StateSnapshot;
use crate::model::{Product, ProductDraft, ProductId, ProductPatch};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, instrument, warn};

pub struct CatalogEngine {
    products: ProductClient,
    snapshot: Vec<Product>,
    criteria: FilterCriteria,
    session: EditSession,
    image_failures: HashSet<ProductId>,
}

impl CatalogEngine {
    pub fn new(products: ProductClient) -> Self {
        Self {
            products,
            snapshot: Vec::new(),
            criteria: FilterCriteria::default(),
            session: EditSession::Idle,
            image_failures: HashSet::new(),
        }
    }

    pub fn client(&self) -> &ProductClient {
        &self.products
    }

    /// Loading and error state shared with every client on the same executor.
    pub fn status(&self) -> StateSnapshot {
        self.products.executor().snapshot()
    }

    /// Replaces the snapshot with the current contents of the store.
    ///
    /// Returns the number of products loaded. On failure the previous snapshot is kept.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<usize, CatalogError> {
        debug!("Refreshing snapshot");
        match self.products.list().await {
            Ok(products) => {
                self.snapshot = products;
                info!(size = self.snapshot.len(), "Snapshot refreshed");
                Ok(self.snapshot.len())
            }
            Err(e) => {
                warn!(error = %e, size = self.snapshot.len(), "Refresh failed, keeping snapshot");
                Err(e.into())
            }
        }
    }

    pub fn snapshot(&self) -> &[Product] {
        &self.snapshot
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// The snapshot filtered by the current criteria, in snapshot order.
    pub fn view(&self) -> Vec<&Product> {
        filter::apply(&self.snapshot, &self.criteria)
    }

    pub fn categories(&self) -> BTreeSet<String> {
        filter::categories(&self.snapshot)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary::from_snapshot(&self.snapshot)
    }

    // --- Edit session ---

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Starts editing a copy of the snapshot entry for `id`, replacing any session in progress.
    pub fn begin_edit(&mut self, id: &ProductId) -> Result<(), CatalogError> {
        let product = self
            .snapshot
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))?;

        if let Some(previous) = self.session.editing_id() {
            debug!(%previous, %id, "Replacing edit session");
        }
        self.session.begin(product);
        Ok(())
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut Product)) -> Result<(), CatalogError> {
        self.session.edit(f)
    }

    pub fn cancel_edit(&mut self) {
        if let Some(copy) = self.session.cancel() {
            debug!(id = %copy.id, "Edit cancelled");
        }
    }

    /// Sends the working copy as a full-field patch.
    ///
    /// On success the session ends and the snapshot is refreshed. On failure the session keeps
    /// the same working copy so the caller can retry.
    #[instrument(skip(self))]
    pub async fn commit_edit(&mut self) -> Result<Product, CatalogError> {
        let copy = self
            .session
            .working_copy()
            .ok_or(CatalogError::NoActiveEdit)?;
        let id = copy.id.clone();
        let patch = ProductPatch::full(copy);

        let updated = self.products.update_product(id.clone(), patch).await?;
        self.session = EditSession::Idle;
        info!(%id, "Edit committed");

        self.refresh_after_write().await;
        Ok(updated)
    }

    // --- Writes ---

    /// Validates and stores a new product, then refreshes.
    #[instrument(skip(self))]
    pub async fn create(&mut self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let created = self.products.create_product(draft).await?;
        info!(id = %created.id, "Created");

        self.refresh_after_write().await;
        Ok(created)
    }

    /// Removes a product, then refreshes.
    ///
    /// A successful delete of the product being edited also ends the edit session.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &ProductId) -> Result<(), CatalogError> {
        self.products.delete(id.clone()).await?;
        info!(%id, "Deleted");

        if self.session.editing_id() == Some(id) {
            self.session.cancel();
            warn!(%id, "Edited product was deleted, session cancelled");
        }

        self.refresh_after_write().await;
        Ok(())
    }

    async fn refresh_after_write(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Write stored but snapshot is stale");
        }
    }

    // --- Image failures ---

    pub fn report_image_failure(&mut self, id: ProductId) {
        if self.image_failures.insert(id.clone()) {
            debug!(%id, "Image failed to load");
        }
    }

    pub fn has_image_failure(&self, id: &ProductId) -> bool {
        self.image_failures.contains(id)
    }

    pub fn image_failures(&self) -> &HashSet<ProductId> {
        &self.image_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::framework::{RequestExecutor, SyncError};
    use serde_json::{json, Value};

    fn products_json() -> Value {
        json!([
            {
                "id": 1, "name": "Earbuds", "description": "Wireless", "category": "Audio",
                "price": 49.0, "stock": 4, "image": "https://img.example/1.png", "featured": true
            },
            {
                "id": 2, "name": "Monitor", "description": "Studio", "category": "Audio",
                "price": 349.0, "stock": 20, "image": "https://img.example/2.png", "featured": false
            }
        ])
    }

    async fn loaded(mock: &MockTransport) -> CatalogEngine {
        mock.expect_list("products").return_json(products_json());
        let mut engine = CatalogEngine::new(ProductClient::from_executor(RequestExecutor::new(
            mock.clone(),
        )));
        assert_eq!(engine.refresh().await, Ok(2));
        engine
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        mock.expect_list("products").return_status(500);
        let result = engine.refresh().await;

        assert_eq!(
            result,
            Err(CatalogError::Sync(SyncError::Protocol { status: 500 }))
        );
        assert_eq!(engine.snapshot().len(), 2);
        assert_eq!(
            engine.status().error.as_deref(),
            Some("HTTP error! status: 500")
        );
        mock.verify();
    }

    #[tokio::test]
    async fn view_uses_current_criteria() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        assert_eq!(engine.view().len(), 2);
        engine.set_criteria(FilterCriteria::default().with_price_range(0.0, 100.0));
        let view: Vec<_> = engine.view().into_iter().map(|p| p.id.clone()).collect();
        assert_eq!(view, vec![ProductId::from(1)]);
        assert_eq!(engine.categories().len(), 1);
    }

    #[tokio::test]
    async fn begin_edit_requires_a_known_id() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        let missing = ProductId::from(42);
        assert_eq!(
            engine.begin_edit(&missing).err(),
            Some(CatalogError::UnknownProduct(missing))
        );
        assert!(!engine.session().is_editing());
    }

    #[tokio::test]
    async fn switching_edits_leaves_snapshot_untouched() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        engine.begin_edit(&ProductId::from(1)).unwrap();
        engine.edit(|p| p.name = "Changed".into()).unwrap();
        engine.begin_edit(&ProductId::from(2)).unwrap();

        assert_eq!(engine.session().editing_id(), Some(&ProductId::from(2)));
        assert_eq!(engine.snapshot()[0].name, "Earbuds");
    }

    #[tokio::test]
    async fn commit_sends_every_field_then_refreshes() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        engine.begin_edit(&ProductId::from(1)).unwrap();
        engine.edit(|p| p.price = 59.0).unwrap();

        mock.expect_update("products", 1).return_json(json!({
            "id": 1, "name": "Earbuds", "description": "Wireless", "category": "Audio",
            "price": 59.0, "stock": 4, "image": "https://img.example/1.png", "featured": true
        }));
        let mut refreshed = products_json();
        refreshed[0]["price"] = json!(59.0);
        mock.expect_list("products").return_json(refreshed);

        let updated = engine.commit_edit().await.unwrap();
        assert_eq!(updated.price, 59.0);
        assert!(!engine.session().is_editing());
        assert_eq!(engine.snapshot()[0].price, 59.0);

        let sent = &mock.requests()[1];
        let body = sent.body.as_ref().unwrap();
        for field in ["name", "description", "category", "price", "stock", "image", "featured"] {
            assert!(body.get(field).is_some(), "missing {field}");
        }
        mock.verify();
    }

    #[tokio::test]
    async fn failed_commit_keeps_working_copy() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        engine.begin_edit(&ProductId::from(1)).unwrap();
        engine.edit(|p| p.stock = 0).unwrap();

        mock.expect_update("products", 1).return_status(500);
        let result = engine.commit_edit().await;

        assert_eq!(
            result.err(),
            Some(CatalogError::Sync(SyncError::Protocol { status: 500 }))
        );
        assert_eq!(engine.session().working_copy().map(|p| p.stock), Some(0));
        assert_eq!(engine.snapshot()[0].stock, 4);
        mock.verify();
    }

    #[tokio::test]
    async fn commit_without_session_is_rejected() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;
        assert_eq!(engine.commit_edit().await.err(), Some(CatalogError::NoActiveEdit));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn deleting_the_edited_product_cancels_the_session() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;
        engine.begin_edit(&ProductId::from(1)).unwrap();

        mock.expect_remove("products", 1).return_json(json!({}));
        mock.expect_list("products")
            .return_json(json!([products_json()[1].clone()]));

        engine.delete(&ProductId::from(1)).await.unwrap();
        assert!(!engine.session().is_editing());
        assert_eq!(engine.snapshot().len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_session() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;
        engine.begin_edit(&ProductId::from(1)).unwrap();

        mock.expect_remove("products", 1).return_status(404);
        assert!(engine.delete(&ProductId::from(1)).await.is_err());
        assert_eq!(engine.session().editing_id(), Some(&ProductId::from(1)));
        assert_eq!(engine.snapshot().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_store() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        let result = engine.create(ProductDraft::default()).await;
        assert!(matches!(
            result,
            Err(CatalogError::Sync(SyncError::Validation { field: "name", .. }))
        ));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn create_succeeds_when_refresh_after_it_fails() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        mock.expect_create("products").return_json(json!({
            "id": 3, "name": "Cable", "description": "Braided", "category": "Accessories",
            "price": 9.0, "stock": 50, "image": "https://img.example/3.png", "featured": false
        }));
        mock.expect_list("products").return_status(503);

        let draft = ProductDraft {
            name: "Cable".into(),
            description: "Braided".into(),
            category: "Accessories".into(),
            price: 9.0,
            stock: 50,
            image: "https://img.example/3.png".into(),
            featured: false,
        };
        let created = engine.create(draft).await.unwrap();

        assert_eq!(created.id, ProductId::from(3));
        assert_eq!(
            engine.status().error.as_deref(),
            Some("HTTP error! status: 503")
        );
        assert_eq!(engine.snapshot().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn commit_and_delete_succeed_when_refresh_after_them_fails() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        engine.begin_edit(&ProductId::from(2)).unwrap();
        engine.edit(|p| p.stock = 21).unwrap();
        let mut stored = products_json()[1].clone();
        stored["stock"] = json!(21);
        mock.expect_update("products", 2).return_json(stored);
        mock.expect_list("products").return_status(503);

        let updated = engine.commit_edit().await.unwrap();
        assert_eq!(updated.stock, 21);
        assert!(!engine.session().is_editing());
        assert_eq!(
            engine.status().error.as_deref(),
            Some("HTTP error! status: 503")
        );

        mock.expect_remove("products", 1).return_json(json!({}));
        mock.expect_list("products").return_transport_error("connection reset");

        assert_eq!(engine.delete(&ProductId::from(1)).await, Ok(()));
        assert_eq!(engine.status().error.as_deref(), Some("connection reset"));
        assert_eq!(engine.snapshot().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn image_failures_are_tracked_per_id() {
        let mock = MockTransport::new();
        let mut engine = loaded(&mock).await;

        engine.report_image_failure(ProductId::from(2));
        engine.report_image_failure(ProductId::from(2));
        assert!(engine.has_image_failure(&ProductId::from(2)));
        assert!(!engine.has_image_failure(&ProductId::from(1)));
        assert_eq!(engine.image_failures().len(), 1);
    }

    #[tokio::test]
    async fn summary_reflects_snapshot() {
        let mock = MockTransport::new();
        let engine = loaded(&mock).await;
        let summary = engine.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.featured.len(), 1);
    }
}

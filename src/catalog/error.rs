//! Error types for the catalog engine.

use crate::framework::SyncError;
use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// An edit operation was requested while no session is active.
    #[error("No edit in progress")]
    NoActiveEdit,

    /// The requested product is not part of the current snapshot.
    #[error("Product not in snapshot: {0}")]
    UnknownProduct(ProductId),

    /// The remote store call failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

//! Local query and edit engine over a snapshot of the `products` collection.
//!
//! - [`CatalogEngine`] - Snapshot refresh, filtered view, edit session and writes
//! - [`FilterCriteria`] - The four-clause filter predicate
//! - [`EditSession`] - Single working copy state machine
//! - [`CatalogSummary`] - Dashboard aggregates

pub mod edit;
pub mod engine;
pub mod error;
pub mod filter;
pub mod summary;

pub use edit::EditSession;
pub use engine::CatalogEngine;
pub use error::CatalogError;
pub use filter::FilterCriteria;
pub use summary::CatalogSummary;

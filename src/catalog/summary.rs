//! Dashboard aggregates over a snapshot.

use crate::model::Product;

/// Stock below this count is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// At most this many featured products are surfaced.
pub const FEATURED_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    pub low_stock: usize,
    pub featured: Vec<Product>,
}

impl CatalogSummary {
    pub fn from_snapshot(snapshot: &[Product]) -> Self {
        Self {
            total: snapshot.len(),
            low_stock: snapshot
                .iter()
                .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
                .count(),
            featured: snapshot
                .iter()
                .filter(|p| p.featured)
                .take(FEATURED_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

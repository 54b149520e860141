//! # Filter Pipeline
//!
//! Pure functions that derive a view from a snapshot. The predicate is the AND of four clauses,
//! each of which can be switched off independently:
//!
//! 1. **Text** - skipped for an empty query; otherwise the lower-cased name *or* description
//!    must contain the lower-cased query.
//! 2. **Category** - skipped when unset or empty; otherwise exact match.
//! 3. **Price** - always on; `min_price <= price <= max_price`. Inverted bounds are not swapped,
//!    they simply match nothing.
//! 4. **Featured** - only on when `featured_only` is set.
//!
//! Filtering is stable: the view keeps the snapshot's relative order.

use crate::model::Product;
use std::collections::BTreeSet;

/// Criteria for one view session.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub query: String,
    pub category: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub featured_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            min_price: 0.0,
            max_price: 1000.0,
            featured_only: false,
        }
    }
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min_price: f64, max_price: f64) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_text(product)
            && self.matches_category(product)
            && self.matches_price(product)
            && (!self.featured_only || product.featured)
    }

    fn matches_text(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => product.category == category,
        }
    }

    fn matches_price(&self, product: &Product) -> bool {
        self.min_price <= product.price && product.price <= self.max_price
    }
}

/// The order-preserving subsequence of `snapshot` that matches `criteria`.
pub fn apply<'a>(snapshot: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    snapshot.iter().filter(|p| criteria.matches(p)).collect()
}

/// Distinct categories present in `snapshot`.
pub fn categories(snapshot: &[Product]) -> BTreeSet<String> {
    snapshot.iter().map(|p| p.category.clone()).collect()
}

//! Catalog items held by the remote store.
//!
//! [`Product`] implements [`Record`] and [`WritableRecord`], so it can be managed through a
//! [`ResourceClient`](crate::framework::ResourceClient):
//! - Creation payload: [`ProductDraft`]
//! - Update payload: [`ProductPatch`]
use serde::{Deserialize, Serialize};

use crate::framework::{Record, SyncError, WritableRecord};
use crate::model::RecordId;

pub type ProductId = RecordId;

/// A complete product record. Every field is required when decoding, so a sparse answer from
/// the store is rejected instead of cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub image: String,
    pub featured: bool,
}

impl Record for Product {
    type Id = ProductId;
    const COLLECTION: &'static str = "products";
}

impl WritableRecord for Product {
    type Create = ProductDraft;
    type Update = ProductPatch;
}

/// DTO for Product creation. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub image: String,
    pub featured: bool,
}

impl ProductDraft {
    /// Every problem with the draft, in field order.
    pub fn validation_errors(&self) -> Vec<SyncError> {
        let mut errors = Vec::new();
        let mut reject = |field: &'static str, reason: &str| {
            errors.push(SyncError::Validation {
                field,
                reason: reason.to_string(),
            })
        };

        if self.name.trim().is_empty() {
            reject("name", "Product name is required");
        }
        if self.description.trim().is_empty() {
            reject("description", "Product description is required");
        }
        if self.category.is_empty() {
            reject("category", "Category is required");
        }
        // written so that NaN is rejected too
        if !(self.price > 0.0) {
            reject("price", "Price must be greater than 0");
        }
        if self.image.trim().is_empty() {
            reject("image", "Image URL is required");
        } else if url::Url::parse(self.image.trim()).is_err() {
            reject("image", "Please enter a valid image URL");
        }

        errors
    }

    /// Returns the first validation failure, if any.
    pub fn validate(&self) -> Result<(), SyncError> {
        match self.validation_errors().into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// DTO for Product updates. Absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl ProductPatch {
    /// Every mutable field of `product`: a full-record overwrite.
    pub fn full(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            category: Some(product.category.clone()),
            price: Some(product.price),
            stock: Some(product.stock),
            image: Some(product.image.clone()),
            featured: Some(product.featured),
        }
    }

    /// Only the fields that differ between `before` and `after`.
    pub fn diff(before: &Product, after: &Product) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }

        Self {
            name: changed(&before.name, &after.name),
            description: changed(&before.description, &after.description),
            category: changed(&before.category, &after.category),
            price: changed(&before.price, &after.price),
            stock: changed(&before.stock, &after.stock),
            image: changed(&before.image, &after.image),
            featured: changed(&before.featured, &after.featured),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

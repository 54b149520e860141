//! # Record Traits
//!
//! The contract a type must satisfy to be read from (and optionally written to) a collection of
//! the remote store through a [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Associated types tie each record to its own payloads: a `Product` is created from a
//! `ProductDraft` and patched with a `ProductPatch`, and the compiler refuses anything else.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record that lives in a named collection.
pub trait Record: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Opaque identifier assigned by the store; used as the last path segment.
    type Id: Display + Debug + Clone + Eq + Hash + Send + Sync;

    /// Collection name, used as the first path segment (`/{COLLECTION}`).
    const COLLECTION: &'static str;
}

/// A record that can also be created and patched.
pub trait WritableRecord: Record {
    /// Creation payload (every field except the identifier).
    type Create: Serialize + Debug + Send + Sync;

    /// Partial update payload; absent fields are left untouched by the store.
    type Update: Serialize + Debug + Send + Sync;
}

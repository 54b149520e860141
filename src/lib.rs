//! # Catalog Sync
//!
//! > **A typed synchronization client and local query engine for a product catalog.**
//!
//! The crate sits between a user interface and a resource-oriented JSON store (json-server
//! style: `/{collection}` and `/{collection}/{id}`). It fetches snapshots of the `products`
//! collection, derives filtered views locally, stages edits in a single working copy and pushes
//! changes back with create/update/delete calls.
//!
//! ## Core Concepts
//!
//! ### One executor, many callers
//! Every remote call goes through a [`RequestExecutor`](framework::RequestExecutor). Each call
//! returns its own `Result`, while the executor also keeps a shared *loading* counter and the
//! last error message for status displays. `loading` stays true until every outstanding call has
//! settled.
//!
//! ### Snapshot, then view
//! The [`CatalogEngine`](catalog::CatalogEngine) never patches its snapshot in place. Every
//! successful write is followed by a full refresh, and the filtered view is recomputed on demand
//! from the snapshot and the current [`FilterCriteria`](catalog::FilterCriteria).
//!
//! ### Typed errors
//! [`SyncError`](framework::SyncError) separates transport failures, non-success statuses,
//! undecodable bodies and client-side validation, so callers branch on the kind instead of
//! matching message text.
//!
//! ### Testing without a store
//! [`framework::mock::MockTransport`] scripts answers request by request, and
//! [`framework::MemoryStore`] is a small in-process store actor with json-server semantics.
//!
//! ## Module Tour
//!
//! ### 1. The Plumbing ([`framework`])
//! Transports, the request executor, shared request state, and the generic
//! [`ResourceClient`](framework::ResourceClient).
//!
//! ### 2. The Data ([`model`])
//! [`Product`](model::Product), [`StoreInfo`](model::StoreInfo), drafts and patches.
//!
//! ### 3. The Interface ([`clients`])
//! Collection-specific clients that add validation and typed payloads.
//!
//! ### 4. The Engine ([`catalog`])
//! Snapshot, filter pipeline, edit session, image-failure tracking and dashboard summary.
//!
//! ### 5. The Wiring ([`lifecycle`])
//! [`CatalogSystem`](lifecycle::CatalogSystem), [`SyncConfig`](lifecycle::SyncConfig) and
//! tracing setup.
//!
//! ## Quick Start
//!
//! ```bash
//! # Against a store on http://localhost:3001
//! RUST_LOG=info cargo run
//!
//! # Against the seeded in-memory store
//! CATALOG_OFFLINE=1 RUST_LOG=info cargo run
//! ```

pub mod catalog;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;

//! Generic synchronization framework for resource-oriented stores.
//!
//! This module provides the building blocks every higher layer uses to talk to the remote
//! collection store.
//!
//! # Main Components
//!
//! - [`RequestExecutor`] - Typed list/get/create/update/remove with shared loading/error state
//! - [`Transport`] - Delivers wire requests ([`HttpTransport`], [`MemoryTransport`])
//! - [`ResourceClient`] - Typed view of one collection for any [`Record`]
//! - [`SyncError`] - Transport, protocol, decode and validation failures
//!
//! # Testing
//!
//! See [`mock`] for a scripted transport, and [`MemoryStore`] for a stateful in-process store.

pub mod client;
pub mod error;
pub mod executor;
pub mod memory;
pub mod message;
pub mod mock;
pub mod record;
pub mod state;
pub mod transport;

pub use client::ResourceClient;
pub use error::SyncError;
pub use executor::RequestExecutor;
pub use memory::{MemoryStore, MemoryTransport};
pub use message::{Method, WireRequest, WireResponse};
pub use record::{Record, WritableRecord};
pub use state::{RequestState, StateSnapshot};
pub use transport::{HttpTransport, Transport};

//! Runtime wiring and process-level setup.
//!
//! # Main Components
//!
//! - [`CatalogSystem`] - Builds the transport, executor, clients and engine, and shuts them down
//! - [`SyncConfig`] - Store location and offline switch, read from the environment
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod catalog_system;
pub mod config;
pub mod seed;
pub mod tracing;

pub use catalog_system::*;
pub use config::*;
pub use self::tracing::*;

//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Requests**: every executor call logs `Sending request` at debug, then either
//!   `Request ok` (info) or `Request rejected` / `Request failed` (warn) with `collection`,
//!   `method`, `path` and `status` fields
//! - **Engine**: snapshot refreshes with their `size`, committed edits, creates and deletes
//! - **In-memory store**: startup, shutdown and rejected requests
//!
//! ## Usage Examples
//!
//! ```bash
//! # Request outcomes and snapshot sizes
//! RUST_LOG=info cargo run
//!
//! # Include request starts and edit-session transitions
//! RUST_LOG=debug cargo run
//!
//! # Only the executor
//! RUST_LOG=catalog_sync::framework=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Store started collections=2
//! INFO refresh: Request ok method=GET path="/products" status=200
//! INFO refresh: Snapshot refreshed size=4
//! ```

/// Initializes tracing for binaries and tests.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}

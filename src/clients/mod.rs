//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod collection_client;
pub mod product_client;
pub mod store_info_client;

pub use collection_client::*;
pub use product_client::*;
pub use store_info_client::*;

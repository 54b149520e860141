//! Pure data structures implementing the [`Record`](crate::framework::Record) trait.

pub mod id;
pub mod product;
pub mod store_info;

pub use id::*;
pub use product::*;
pub use store_info::*;

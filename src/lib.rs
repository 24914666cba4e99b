//! rdb Loader
//!
//! Bulk-loads in-memory tabular datasets into an rdb schema store
//! over its HTTP load endpoint.

pub mod client;
pub mod dataset;
pub mod loader;

// Re-exports for convenience
pub use client::RdbClient;
pub use dataset::{Dataset, Scalar};
pub use loader::{LoadResult, TableLoader};

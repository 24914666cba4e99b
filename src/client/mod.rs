//! rdb HTTP client.
//!
//! This module provides the [`RdbClient`] for talking to an rdb schema
//! store's HTTP API.

mod rdb;

pub use rdb::RdbClient;

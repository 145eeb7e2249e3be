//! classbook-client: remote student store integration.
//!
//! Implements the `StudentStore` trait over HTTP, loads client
//! configuration, and provides an in-memory store for tests.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{create_store, load_config, ClassbookConfig};
pub use http::HttpStudentStore;
pub use mock::MockStore;

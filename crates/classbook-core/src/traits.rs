//! Core trait definition for the remote student store.
//!
//! Implemented over HTTP by `classbook-client`, and in memory by its
//! `MockStore` for tests.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::Student;

/// The four operations the client relies on.
///
/// Mutating calls return nothing useful; callers refresh with
/// [`StudentStore::list_students`] afterwards.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Human-readable store name for logs (e.g. the base URL).
    fn name(&self) -> &str;

    /// Fetch the whole collection in store order.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;

    /// Create a student; the store assigns the id.
    async fn create_student(&self, name: &str, average: f64) -> Result<(), StoreError>;

    /// Overwrite name and average. Unknown ids are the store's concern.
    async fn update_student(&self, id: i64, name: &str, average: f64) -> Result<(), StoreError>;

    async fn delete_student(&self, id: i64) -> Result<(), StoreError>;
}

//! In-memory store for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use classbook_core::error::StoreError;
use classbook_core::model::Student;
use classbook_core::traits::StudentStore;

/// A mock student store that behaves like a well-mannered backend.
///
/// Ids are assigned sequentially, updates to unknown ids are ignored, and
/// the whole store can be switched offline to simulate network failures.
pub struct MockStore {
    rows: Mutex<Vec<Student>>,
    next_id: Mutex<i64>,
    /// Number of calls made, of any kind.
    call_count: AtomicU32,
    offline: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_students(Vec::new())
    }

    /// Seed the store. New ids continue after the highest seeded id.
    pub fn with_students(students: Vec<Student>) -> Self {
        let next_id = students.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(students),
            next_id: Mutex::new(next_id),
            call_count: AtomicU32::new(0),
            offline: AtomicBool::new(false),
        }
    }

    /// Get the number of calls made to this store.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// While offline every call fails with [`StoreError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// Current server-side contents.
    pub fn rows(&self) -> Vec<Student> {
        self.rows.lock().unwrap().clone()
    }

    fn begin_call(&self) -> Result<(), StoreError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.offline.load(Ordering::Relaxed) {
            return Err(StoreError::Network("mock store is offline".into()));
        }
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentStore for MockStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        self.begin_call()?;
        Ok(self.rows())
    }

    async fn create_student(&self, name: &str, average: f64) -> Result<(), StoreError> {
        self.begin_call()?;
        let mut next_id = self.next_id.lock().unwrap();
        self.rows
            .lock()
            .unwrap()
            .push(Student::new(*next_id, name, average));
        *next_id += 1;
        Ok(())
    }

    async fn update_student(&self, id: i64, name: &str, average: f64) -> Result<(), StoreError> {
        self.begin_call()?;
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|s| s.id == id) {
            row.name = name.to_string();
            row.average = average;
        }
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<(), StoreError> {
        self.begin_call()?;
        self.rows.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

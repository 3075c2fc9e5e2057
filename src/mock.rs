//! In-memory storage for tests and for embedding without a filesystem.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Map-backed [`StorageBackend`] that records every operation, so callers
/// can assert on what a save actually touched.
#[derive(Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
    ops: Mutex<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.lock().contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().len()
    }

    /// Operations seen so far, in order, as `"<op> <path>"` lines.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().clone()
    }

    fn record(&self, op: &str, path: &str) {
        self.ops.lock().push(format!("{op} {path}"));
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.record("read", path);
        self.files
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError> {
        self.record("write", path);
        self.files.lock().insert(path.to_string(), bytes.to_vec());
        Ok(path.to_string())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.record("delete", path);
        self.files
            .lock()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

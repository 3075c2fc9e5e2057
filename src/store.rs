use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::StoreError;
use crate::records::Identifiable;

/// Record persistence seam. The pipeline invokes `persist` exactly once per
/// save, after all image work; `find_by_id` returns the last-persisted
/// snapshot, and a missing row means "new record", not an error.
#[async_trait]
pub trait RecordStore<T: Send + Sync>: Send + Sync {
    async fn persist(&self, record: &T) -> Result<Uuid, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError>;
}

/// Keeps serialized snapshots keyed by id, so a lookup hands back the
/// persisted copy rather than anything shared with live records.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<Uuid, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore
where
    T: Identifiable + Serialize + DeserializeOwned + Send + Sync,
{
    async fn persist(&self, record: &T) -> Result<Uuid, StoreError> {
        let bytes = serde_json::to_vec(record)?;
        let id = record.id();
        self.rows.lock().insert(id, bytes);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        match self.rows.lock().get(&id) {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use shopbook_core::RecordId;
use shopbook_records::{Fields, RecordKind, StoredRecord};

use super::{RecordStore, StoreError};

/// In-memory record store for tests/dev.
///
/// Collections keep insertion order, matching the creation order a real
/// store lists in.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    inner: RwLock<HashMap<RecordKind, Vec<StoredRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Storage("in-memory store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn add(&self, kind: RecordKind, fields: Fields) -> Result<RecordId, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let id = RecordId::new();
        map.entry(kind)
            .or_default()
            .push(StoredRecord::new(id, fields));
        Ok(id)
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&kind).cloned().unwrap_or_default())
    }

    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let not_found = StoreError::NotFound {
            collection: kind.collection(),
            id,
        };
        let records = map.get_mut(&kind).ok_or_else(|| not_found.clone())?;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(not_found)?;
        records.remove(position);
        Ok(())
    }
}

//! Record store adapters.
//!
//! The rest of the system consumes exactly three operations per collection:
//! add a document, list a collection, delete by id. Failures are reported to
//! the caller and never retried here.

use std::sync::Arc;

use thiserror::Error;

use shopbook_core::RecordId;
use shopbook_records::{Fields, RecordKind, StoredRecord};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;

/// Record store error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record {id} not found in `{collection}`")]
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Document store holding the `inventory`, `sales` and `debtors` collections.
///
/// No atomicity across collections; concurrent writers are last-write-wins.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Store a document and return its newly assigned identifier.
    async fn add(&self, kind: RecordKind, fields: Fields) -> Result<RecordId, StoreError>;

    /// All documents of a collection, in creation order.
    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StoreError>;

    /// Remove one document. Unknown ids are `StoreError::NotFound`.
    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn add(&self, kind: RecordKind, fields: Fields) -> Result<RecordId, StoreError> {
        (**self).add(kind, fields).await
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StoreError> {
        (**self).list(kind).await
    }

    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), StoreError> {
        (**self).delete(kind, id).await
    }
}

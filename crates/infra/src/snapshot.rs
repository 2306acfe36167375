//! Snapshot of the three collections fetched together.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopbook_records::{RecordKind, StoredRecord};
use shopbook_reporting::{summarize, Summary, Window};

/// The three record lists as of one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSnapshot {
    pub inventory: Vec<StoredRecord>,
    pub sales: Vec<StoredRecord>,
    pub debts: Vec<StoredRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl RecordSnapshot {
    pub fn records(&self, kind: RecordKind) -> &[StoredRecord] {
        match kind {
            RecordKind::Inventory => &self.inventory,
            RecordKind::Sale => &self.sales,
            RecordKind::Debt => &self.debts,
        }
    }

    pub fn summarize(&self, window: Window) -> Summary {
        summarize(
            &self.inventory,
            &self.sales,
            &self.debts,
            window.start(),
            window.end(),
        )
    }
}

/// Holder of the most recent snapshot. Each store replaces the previous one
/// wholesale (last write wins, no merge).
#[derive(Debug, Default)]
pub struct SnapshotCache {
    latest: RwLock<Option<Arc<RecordSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held snapshot. A lock poisoned by a panicking writer is
    /// recovered; the value behind it is overwritten anyway.
    pub fn store(&self, snapshot: Arc<RecordSnapshot>) {
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = Some(snapshot);
    }

    pub fn latest(&self) -> Option<Arc<RecordSnapshot>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

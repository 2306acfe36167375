//! Record service: the operations behind every user action.
//!
//! Each call is one round trip to the store:
//!
//! ```text
//! create:    validate -> store.add
//! list:      store.list
//! delete:    store.delete
//! summarize: store.list x3 -> snapshot -> summarize
//! ```
//!
//! Failures are returned as-is; nothing is retried and a failed call leaves
//! both the store and the cached snapshot untouched.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use shopbook_core::RecordId;
use shopbook_records::{validate, Fields, RecordKind, StoredRecord, ValidationError};
use shopbook_reporting::{daily_sales, DailySales, Summary, Window};

use crate::record_store::{RecordStore, StoreError};
use crate::snapshot::{RecordSnapshot, SnapshotCache};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submitted record was rejected; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The store failed; state is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct RecordService<S> {
    store: S,
    snapshots: SnapshotCache,
}

impl<S> RecordService<S>
where
    S: RecordStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshots: SnapshotCache::new(),
        }
    }

    /// Validate a submitted document and store its canonical form.
    pub async fn create(&self, kind: RecordKind, fields: &Fields) -> Result<RecordId, ServiceError> {
        let record = validate(kind, fields).inspect_err(|e| {
            tracing::info!(collection = kind.collection(), field = e.field(), "rejected record: {e}");
        })?;

        let id = self
            .store
            .add(kind, record.to_fields())
            .await
            .inspect_err(|e| tracing::warn!(collection = kind.collection(), "add failed: {e}"))?;

        tracing::info!(collection = kind.collection(), %id, "record created");
        Ok(id)
    }

    pub async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, ServiceError> {
        let records = self
            .store
            .list(kind)
            .await
            .inspect_err(|e| tracing::warn!(collection = kind.collection(), "list failed: {e}"))?;
        Ok(records)
    }

    pub async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), ServiceError> {
        self.store
            .delete(kind, id)
            .await
            .inspect_err(|e| tracing::warn!(collection = kind.collection(), %id, "delete failed: {e}"))?;
        tracing::info!(collection = kind.collection(), %id, "record deleted");
        Ok(())
    }

    /// Fetch all three collections and replace the cached snapshot.
    pub async fn refresh(&self) -> Result<Arc<RecordSnapshot>, ServiceError> {
        let inventory = self.list(RecordKind::Inventory).await?;
        let sales = self.list(RecordKind::Sale).await?;
        let debts = self.list(RecordKind::Debt).await?;

        let snapshot = Arc::new(RecordSnapshot {
            inventory,
            sales,
            debts,
            fetched_at: Utc::now(),
        });
        self.snapshots.store(snapshot.clone());

        tracing::debug!(
            inventory = snapshot.inventory.len(),
            sales = snapshot.sales.len(),
            debts = snapshot.debts.len(),
            "snapshot refreshed"
        );
        Ok(snapshot)
    }

    /// Snapshot from the most recent successful `refresh`, if any.
    pub fn last_snapshot(&self) -> Option<Arc<RecordSnapshot>> {
        self.snapshots.latest()
    }

    /// Refresh, then summarise the fresh snapshot over `window`.
    pub async fn summarize(&self, window: Window) -> Result<Summary, ServiceError> {
        let snapshot = self.refresh().await?;
        Ok(snapshot.summarize(window))
    }

    /// Per-day sales totals over `window` from a fresh sales list.
    pub async fn daily_sales(&self, window: Window) -> Result<Vec<DailySales>, ServiceError> {
        let sales = self.list(RecordKind::Sale).await?;
        Ok(daily_sales(&sales, window.start(), window.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use shopbook_core::Money;

    use crate::record_store::InMemoryRecordStore;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sale(date: &str, amount: f64) -> Fields {
        fields(json!({
            "sale_date": date,
            "buyer_name": "Ada",
            "perfume_name": "Oud Wood",
            "sale_amount": amount,
        }))
    }

    /// Store whose every call fails, for failure-path tests.
    struct DownStore;

    #[async_trait::async_trait]
    impl RecordStore for DownStore {
        async fn add(&self, _kind: RecordKind, _fields: Fields) -> Result<RecordId, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn list(&self, _kind: RecordKind) -> Result<Vec<StoredRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn delete(&self, _kind: RecordKind, _id: RecordId) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn create_stores_canonical_fields() {
        let service = RecordService::new(InMemoryRecordStore::new());
        let mut submitted = sale("2024-01-02", 50.0);
        submitted.insert("sale_comments".into(), json!("cash"));

        let id = service.create(RecordKind::Sale, &submitted).await.unwrap();

        let listed = service.list(RecordKind::Sale).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].fields["comments"], "cash");
        assert_eq!(listed[0].fields["sale_quantity"], 1);
        assert!(!listed[0].fields.contains_key("sale_comments"));
    }

    #[tokio::test]
    async fn rejected_create_writes_nothing() {
        let service = RecordService::new(InMemoryRecordStore::new());

        let err = service
            .create(RecordKind::Sale, &sale("2024-01-02", -3.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::Negative { field: "sale_amount" })
        ));
        assert!(service.list(RecordKind::Sale).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn summarize_reads_fresh_lists() {
        let store = Arc::new(InMemoryRecordStore::new());
        let service = RecordService::new(store.clone());
        let window = Window::new(d("2024-01-01"), d("2024-01-07"));

        service.create(RecordKind::Sale, &sale("2024-01-02", 50.0)).await.unwrap();
        let first = service.summarize(window).await.unwrap();
        assert_eq!(first.sales_total_amount, Money::from_minor(5000));

        // Written behind the service's back, e.g. by another dashboard.
        store
            .add(RecordKind::Sale, sale("2024-01-03", 25.0))
            .await
            .unwrap();
        let second = service.summarize(window).await.unwrap();
        assert_eq!(second.sales_total_amount, Money::from_minor(7500));
    }

    #[tokio::test]
    async fn refresh_overwrites_previous_snapshot() {
        let service = RecordService::new(InMemoryRecordStore::new());
        assert!(service.last_snapshot().is_none());

        service.refresh().await.unwrap();
        assert!(service.last_snapshot().unwrap().sales.is_empty());

        service.create(RecordKind::Sale, &sale("2024-01-02", 50.0)).await.unwrap();
        let fresh = service.refresh().await.unwrap();

        let cached = service.last_snapshot().unwrap();
        assert_eq!(cached.sales.len(), 1);
        assert_eq!(cached.fetched_at, fresh.fetched_at);
        assert_eq!(cached.records(RecordKind::Sale).len(), 1);
    }

    #[tokio::test]
    async fn store_failures_surface_and_keep_cached_snapshot() {
        let service = RecordService::new(DownStore);

        let err = service
            .create(RecordKind::Sale, &sale("2024-01-02", 50.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Unavailable(_))));

        let err = service
            .summarize(Window::new(d("2024-01-01"), d("2024-01-07")))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(service.last_snapshot().is_none());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let service = RecordService::new(InMemoryRecordStore::new());
        let err = service
            .delete(RecordKind::Inventory, RecordId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn daily_sales_groups_fresh_sales() {
        let service = RecordService::new(InMemoryRecordStore::new());
        service.create(RecordKind::Sale, &sale("2024-01-02", 10.0)).await.unwrap();
        service.create(RecordKind::Sale, &sale("2024-01-02", 5.0)).await.unwrap();

        let series = service
            .daily_sales(Window::new(d("2024-01-01"), d("2024-01-07")))
            .await
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].sale_count, 2);
        assert_eq!(series[0].total_amount, Money::from_minor(1500));
    }
}

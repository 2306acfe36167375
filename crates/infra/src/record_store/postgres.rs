//! Postgres-backed record store.
//!
//! All three collections live in one `records` table; the collection name is
//! a column and the document is a flat `jsonb` value.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | PoolTimedOut / PoolClosed / Io | `Unavailable` |
//! | Database / Decode / other | `Storage` |

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use shopbook_core::RecordId;
use shopbook_records::{Fields, RecordKind, StoredRecord};

use super::{RecordStore, StoreError};

/// Postgres-backed document store.
///
/// `Send + Sync`; the SQLx pool handles connection sharing.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: Arc<PgPool>,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect to `database_url` and make sure the `records` table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the `records` table and its listing index if absent.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                id         UUID PRIMARY KEY,
                collection TEXT NOT NULL,
                fields     JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_records_table", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS records_collection_created_at ON records (collection, created_at)",
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_records_index", e))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for PostgresRecordStore {
    #[instrument(skip(self, fields), fields(collection = kind.collection()))]
    async fn add(&self, kind: RecordKind, fields: Fields) -> Result<RecordId, StoreError> {
        let id = RecordId::new();

        sqlx::query("INSERT INTO records (id, collection, fields) VALUES ($1, $2, $3)")
            .bind(*id.as_uuid())
            .bind(kind.collection())
            .bind(Json(&fields))
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("add", e))?;

        Ok(id)
    }

    #[instrument(skip(self), fields(collection = kind.collection()))]
    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, fields
            FROM records
            WHERE collection = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(kind.collection())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.into_iter()
            .map(|row| -> Result<StoredRecord, StoreError> {
                let id: Uuid = row
                    .try_get("id")
                    .map_err(|e| map_sqlx_error("list.id", e))?;
                let Json(fields): Json<Fields> = row
                    .try_get("fields")
                    .map_err(|e| map_sqlx_error("list.fields", e))?;
                Ok(StoredRecord::new(RecordId::from_uuid(id), fields))
            })
            .collect()
    }

    #[instrument(skip(self), fields(collection = kind.collection(), id = %id))]
    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(kind.collection())
            .bind(*id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: kind.collection(),
                id,
            });
        }
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => {
            StoreError::Storage(format!("database error in {operation}: {}", db_err.message()))
        }
        other => StoreError::Storage(format!("{operation}: {other}")),
    }
}

use std::sync::Arc;

use shopbook_infra::{
    InMemoryRecordStore, PostgresRecordStore, RecordService, RecordStore, StoreConfig, StoreError,
};

/// Shared state handed to every handler.
pub struct AppServices {
    pub records: RecordService<Arc<dyn RecordStore>>,
}

/// Open the configured store. A store that cannot be reached halts startup.
pub async fn build_services(store: &StoreConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn RecordStore> = match store {
        StoreConfig::InMemory => {
            tracing::info!(backend = "memory", "record store ready");
            Arc::new(InMemoryRecordStore::new())
        }
        StoreConfig::Postgres { database_url } => {
            let pg = PostgresRecordStore::connect(database_url).await?;
            tracing::info!(backend = "postgres", "record store ready");
            Arc::new(pg)
        }
    };

    Ok(AppServices {
        records: RecordService::new(store),
    })
}

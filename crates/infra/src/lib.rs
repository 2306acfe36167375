//! Infrastructure layer: record stores, the record service, configuration.

pub mod config;
pub mod record_service;
pub mod record_store;
pub mod snapshot;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use record_service::{RecordService, ServiceError};
pub use record_store::{InMemoryRecordStore, PostgresRecordStore, RecordStore, StoreError};
pub use snapshot::{RecordSnapshot, SnapshotCache};

//! Record model for the shop's three collections.
//!
//! This crate contains the field sets of inventory items, sales and debts,
//! and the validation that runs before anything is handed to a store. It is
//! deterministic domain logic only (no IO, no HTTP, no storage).

pub mod error;
pub mod kind;
pub mod record;
pub mod stored;
pub mod validate;

/// A flat document as stored in a collection: field name to primitive value.
pub type Fields = serde_json::Map<String, serde_json::Value>;

pub use error::ValidationError;
pub use kind::{FieldSpec, FieldType, RecordKind, UnknownCollection};
pub use record::{Debt, Gender, ImageRef, InventoryItem, Record, Sale};
pub use stored::StoredRecord;
pub use validate::validate;

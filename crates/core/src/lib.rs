//! `shopbook-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the record model,
//! the reporting layer and the store adapters (no infrastructure concerns).

pub mod date;
pub mod error;
pub mod id;
pub mod money;

pub use date::{format_calendar_date, parse_calendar_date, DateParseError, DATE_FORMAT};
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use money::{Money, MoneyParseError};

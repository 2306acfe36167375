//! Reporting over the shop's records.
//!
//! Everything here is a pure function of caller-supplied record lists: the
//! caller fetches (or caches) the lists and passes them in. Nothing in this
//! crate holds records between calls.

pub mod daily;
pub mod summary;
pub mod window;

pub use daily::{daily_sales, DailySales};
pub use summary::{summarize, Summary, SummaryRow};
pub use window::Window;

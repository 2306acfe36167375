//! Per-day sales series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use shopbook_core::Money;
use shopbook_records::{RecordKind, StoredRecord};

use crate::summary::{amount_or_zero, in_window};
use crate::window::Window;

/// Sales booked on one calendar day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sale_count: u64,
    pub total_amount: Money,
}

/// Sales totals per day inside `[start, end]`, oldest first.
///
/// Days without sales are omitted. Same skip rules as `summarize`.
pub fn daily_sales(sales: &[StoredRecord], start: NaiveDate, end: NaiveDate) -> Vec<DailySales> {
    let mut days: BTreeMap<NaiveDate, DailySales> = BTreeMap::new();

    for entry in in_window(sales, RecordKind::Sale, Window::new(start, end)) {
        let amount = amount_or_zero(entry, RecordKind::Sale);
        let day = days.entry(entry.1).or_insert(DailySales {
            date: entry.1,
            sale_count: 0,
            total_amount: Money::ZERO,
        });
        day.sale_count += 1;
        day.total_amount = day.total_amount.saturating_add(amount);
    }

    days.into_values().collect()
}

//! Windowed summary over the three collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopbook_core::Money;
use shopbook_records::{RecordKind, StoredRecord};

use crate::window::Window;

/// Rollup of one window.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub inventory_added_count: u64,
    pub sales_total_amount: Money,
    pub new_debtor_count: u64,
    pub debt_total_amount: Money,
}

/// One labelled figure of a summary, ready for a chart or table.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub category: &'static str,
    pub total: f64,
}

impl Summary {
    pub fn is_zero(&self) -> bool {
        *self == Summary::default()
    }

    /// The four figures in display order.
    pub fn categories(&self) -> [SummaryRow; 4] {
        [
            SummaryRow {
                category: "Inventory Added",
                total: self.inventory_added_count as f64,
            },
            SummaryRow {
                category: "Sales Amount",
                total: self.sales_total_amount.to_major(),
            },
            SummaryRow {
                category: "New Debtors",
                total: self.new_debtor_count as f64,
            },
            SummaryRow {
                category: "Debtors Amount",
                total: self.debt_total_amount.to_major(),
            },
        ]
    }
}

/// Summarise the records dated inside `[start, end]` (inclusive).
///
/// Records whose date is missing or unparsable are skipped. An in-window
/// record without a usable amount is still counted but adds nothing to the
/// totals. `start > end` yields an all-zero summary.
pub fn summarize(
    inventory: &[StoredRecord],
    sales: &[StoredRecord],
    debts: &[StoredRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Summary {
    let window = Window::new(start, end);
    if window.is_empty() {
        return Summary::default();
    }

    let inventory_added_count = in_window(inventory, RecordKind::Inventory, window).count() as u64;

    let sales_total_amount: Money = in_window(sales, RecordKind::Sale, window)
        .map(|r| amount_or_zero(r, RecordKind::Sale))
        .sum();

    let (new_debtor_count, debt_total_amount) = in_window(debts, RecordKind::Debt, window)
        .fold((0u64, Money::ZERO), |(count, total), r| {
            (count + 1, total.saturating_add(amount_or_zero(r, RecordKind::Debt)))
        });

    Summary {
        inventory_added_count,
        sales_total_amount,
        new_debtor_count,
        debt_total_amount,
    }
}

/// Records of `kind` whose date parses and lies inside `window`.
pub(crate) fn in_window(
    records: &[StoredRecord],
    kind: RecordKind,
    window: Window,
) -> impl Iterator<Item = (&StoredRecord, NaiveDate)> {
    records.iter().filter_map(move |r| match r.date(kind) {
        Ok(date) => window.contains(date).then_some((r, date)),
        Err(e) => {
            tracing::debug!(collection = kind.collection(), id = %r.id, "skipping record: {e}");
            None
        }
    })
}

pub(crate) fn amount_or_zero((record, _): (&StoredRecord, NaiveDate), kind: RecordKind) -> Money {
    record.amount(kind).unwrap_or_else(|| {
        tracing::debug!(
            collection = kind.collection(),
            id = %record.id,
            field = kind.amount_field(),
            "record has no usable amount; counting it as zero"
        );
        Money::ZERO
    })
}

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date range `[start, end]`.
///
/// A window whose start is after its end is not an error; it is empty and
/// contains no dates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The week ending on `today`: `[today - 7 days, today]`.
    pub fn trailing_week(today: NaiveDate) -> Self {
        let start = today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

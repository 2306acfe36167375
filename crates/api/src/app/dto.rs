use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopbook_core::parse_calendar_date;
use shopbook_reporting::{DailySales, Summary, SummaryRow, Window};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`; either bound may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl WindowQuery {
    /// Resolve against `today`: a missing bound comes from the trailing week.
    pub fn resolve(&self, today: NaiveDate) -> Result<Window, axum::response::Response> {
        let fallback = Window::trailing_week(today);
        let start = parse_bound("start", self.start.as_deref())?.unwrap_or(fallback.start());
        let end = parse_bound("end", self.end.as_deref())?.unwrap_or(fallback.end());
        Ok(Window::new(start, end))
    }
}

fn parse_bound(
    name: &str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, axum::response::Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_calendar_date(s).map(Some).map_err(|e| {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_date", format!("{name}: {e}"))
        }),
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub window: Window,
    pub summary: Summary,
    pub categories: [SummaryRow; 4],
}

impl SummaryResponse {
    pub fn new(window: Window, summary: Summary) -> Self {
        Self {
            window,
            categories: summary.categories(),
            summary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailySalesResponse {
    pub window: Window,
    pub days: Vec<DailySales>,
}

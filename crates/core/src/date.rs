//! Calendar dates.
//!
//! Every date field in the shop's records is a `YYYY-MM-DD` string with no
//! time-of-day component. Anything else is a parse failure.

use chrono::NaiveDate;
use thiserror::Error;

/// `chrono` format string for record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date string that is not a `YYYY-MM-DD` calendar date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{input}` is not a YYYY-MM-DD calendar date")]
pub struct DateParseError {
    input: String,
}

impl DateParseError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// `chrono` alone tolerates unpadded months/days and signed years, so the
/// shape is checked before the calendar is.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(DateParseError {
            input: input.to_string(),
        });
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| DateParseError {
        input: input.to_string(),
    })
}

/// Render a date the way records store it.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

//! Records as they come back from a store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shopbook_core::{parse_calendar_date, DateParseError, Money, RecordId};

use crate::kind::RecordKind;
use crate::Fields;

/// A stored document plus its store-assigned identifier.
///
/// Fields are kept raw: documents written by older dashboard variants may be
/// missing fields or carry malformed values, and readers decide how strict
/// to be. Serialises as the fields with an extra `id` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl StoredRecord {
    pub fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Calendar date of the record under `kind`'s date field.
    ///
    /// A missing or non-string value is a parse failure like any other.
    pub fn date(&self, kind: RecordKind) -> Result<NaiveDate, DateParseError> {
        match self.fields.get(kind.date_field()) {
            Some(Value::String(s)) => parse_calendar_date(s),
            Some(other) => parse_calendar_date(&other.to_string()),
            None => parse_calendar_date(""),
        }
    }

    /// Currency amount under `kind`'s amount field, if present and valid.
    pub fn amount(&self, kind: RecordKind) -> Option<Money> {
        match self.fields.get(kind.amount_field())? {
            Value::Number(n) => Money::parse_major(&n.to_string()).ok(),
            Value::String(s) => Money::parse_major(s).ok(),
            _ => None,
        }
    }
}

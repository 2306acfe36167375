use thiserror::Error;

use shopbook_core::{DateParseError, DomainError};

/// A submitted record failed validation; nothing was written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` cannot be negative")]
    Negative { field: &'static str },

    #[error("field `{field}` must be at least 1")]
    NotPositive { field: &'static str },

    #[error("field `{field}` must be a whole number")]
    NotWholeNumber { field: &'static str },

    #[error("field `{field}`: {source}")]
    InvalidDate {
        field: &'static str,
        source: DateParseError,
    },

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` must be one of Masculine, Feminine, Unisex (got `{value}`)")]
    InvalidGender { field: &'static str, value: String },
}

impl ValidationError {
    /// Canonical name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::Negative { field }
            | ValidationError::NotPositive { field }
            | ValidationError::NotWholeNumber { field }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::WrongType { field, .. }
            | ValidationError::InvalidGender { field, .. } => field,
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(value: ValidationError) -> Self {
        DomainError::validation(value.to_string())
    }
}

//! Currency amounts.
//!
//! Amounts are held as non-negative integer minor units (cents) so sums are
//! exact. On the wire they travel as JSON numbers in major units (`12.5`),
//! which is how the shop's stored documents have always carried them.
//!
//! Conversion from major units goes through the decimal text of the value,
//! never through binary floating point arithmetic, so `1.005` rounds to
//! `1.01` as written.

use core::fmt;
use core::iter::Sum;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::{DomainError, DomainResult};

const MINOR_PER_MAJOR: u64 = 100;

/// Why a major-unit amount could not become `Money`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("`{0}` is not a decimal number")]
    NotANumber(String),
    #[error("amount cannot be negative")]
    Negative,
    #[error("amount is too large")]
    TooLarge,
}

impl From<MoneyParseError> for DomainError {
    fn from(err: MoneyParseError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// Non-negative currency amount in smallest currency unit (e.g. cents).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Parse a major-unit decimal (`"12.345"`, `"1e3"`), rounding half away
    /// from zero to two decimals.
    pub fn parse_major(input: &str) -> Result<Self, MoneyParseError> {
        let text = input.trim();
        let parsed = if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            text.parse::<Decimal>()
        };
        let value = parsed.map_err(|_| MoneyParseError::NotANumber(text.to_string()))?;
        Self::from_decimal(value)
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyParseError> {
        if value < Decimal::ZERO {
            return Err(MoneyParseError::Negative);
        }
        value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_u64())
            .map(Self)
            .ok_or(MoneyParseError::TooLarge)
    }

    /// Convert a major-unit float using its shortest decimal rendering, so
    /// `1.005` is treated as the decimal `1.005`.
    pub fn from_major(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("amount must be a finite number"));
        }
        Ok(Self::parse_major(&value.to_string())?)
    }

    pub fn minor_units(self) -> u64 {
        self.0
    }

    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major(value).map_err(D::Error::custom)
    }
}

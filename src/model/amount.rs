//! Amount type for budget and expense values.
//!
//! This module provides the `Amount` type which wraps a finite `f64` and gives it the decimal text
//! form used in the data file and the report.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::num::ParseFloatError;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Represents a money value.
///
/// Parsed and deserialized amounts are always finite. Sums and differences of large amounts can
/// overflow to infinity, which is written as `Infinity` or `-Infinity`. Other values are written
/// in the plain decimal form where whole numbers keep a trailing `.0`, which is how the data file
/// has always stored them.
///
/// ```
/// # use daily_budget::model::Amount;
/// # use std::str::FromStr;
/// assert_eq!(Amount::from_str("100").unwrap().to_string(), "100.0");
/// assert_eq!(Amount::from_str(" 12.5 ").unwrap().to_string(), "12.5");
/// assert!(Amount::from_str("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Creates a new `Amount`. Returns `None` if `value` is NaN or infinite.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the underlying value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("'{0}' is not a number")]
    NotANumber(String, #[source] ParseFloatError),
    #[error("'{0}' is not a finite number")]
    NotFinite(String),
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = f64::from_str(trimmed)
            .map_err(|e| AmountError::NotANumber(trimmed.to_string(), e))?;
        Amount::new(value).ok_or_else(|| AmountError::NotFinite(trimmed.to_string()))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            return f.write_str("NaN");
        }
        if self.0.is_infinite() {
            return f.write_str(if self.0 > 0.0 { "Infinity" } else { "-Infinity" });
        }
        let s = self.0.to_string();
        if s.contains('.') {
            f.write_str(&s)
        } else {
            write!(f, "{s}.0")
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Amount::new(value).ok_or_else(|| serde::de::Error::custom("amount must be finite"))
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

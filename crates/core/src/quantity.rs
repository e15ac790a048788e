//! Stock quantity value type.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A stock quantity: finite and non-negative.
///
/// Fractional quantities are allowed (bulk materials are counted in kg or
/// litres), so this wraps `f64` rather than an integer type.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("quantity must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        // -0.0 folds to 0.0 so rendered values never carry a sign.
        let value = if value == 0.0 { 0.0 } else { value };
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's shortest round-trip formatting: whole values print as `50`,
        // not `50.0`.
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("not a number: {s:?}")))?;
        Self::new(value)
    }
}

impl TryFrom<f64> for Quantity {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

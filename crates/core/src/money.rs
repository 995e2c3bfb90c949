use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A monetary value compared numerically: `48.2` and `48.20` are the same
/// amount no matter how the source formatted them. Stored normalized so
/// equality and hashing agree across representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn from_decimal(value: Decimal) -> Self {
        Amount(value.normalize())
    }

    /// Parse a plain decimal literal. Sign handling is left to the caller;
    /// receipts and purchases reject negatives at their own boundaries.
    pub fn parse(s: &str) -> Option<Self> {
        Decimal::from_str(s.trim()).ok().map(Amount::from_decimal)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

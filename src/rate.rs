//! Fixed-point exchange rate with 8 decimal places.
//!
//! Uses `rust_decimal` internally so rates read from the feed keep every
//! digit the feed carries, without floating-point rounding.

use crate::error::{FeedError, Result};
use crate::layout::{RATE_DECIMAL_PLACES, RATE_INTEGER_PLACES, RATE_WIDTH};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An exchange rate scaled to exactly [`Rate::SCALE`] decimal places.
///
/// # Examples
///
/// ```
/// use fx_rate_feed::Rate;
///
/// let rate = Rate::decode_fixed_point("000013654316250").unwrap();
/// assert_eq!(rate.to_string(), "136.54316250");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// The number of decimal places carried by the feed.
    pub const SCALE: u32 = RATE_DECIMAL_PLACES as u32;

    pub const ZERO: Self = Rate(Decimal::ZERO);

    /// Creates a new `Rate`, normalizing to 8 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Rate(normalized)
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Decodes a 15-digit fixed-point field.
    ///
    /// The first 7 digits are the integer part and the remaining 8 the
    /// fraction. Signs, separators, whitespace and exponents are rejected.
    pub fn decode_fixed_point(field: &str) -> Result<Self> {
        let invalid = |reason: String| FeedError::InvalidRateEncoding {
            value: field.to_string(),
            reason,
        };

        if field.len() != RATE_WIDTH {
            return Err(invalid(format!(
                "expected {} characters, got {}",
                RATE_WIDTH,
                field.len()
            )));
        }
        if !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected only digits".to_string()));
        }

        let (integer, fraction) = field.split_at(RATE_INTEGER_PLACES);
        let value = Decimal::from_str(&format!("{}.{}", integer, fraction))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Rate::new(value))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", self.0)
    }
}

impl Serialize for Rate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.8}", self.0))
    }
}

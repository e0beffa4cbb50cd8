//! Fixed-width layout of the exchange rate feed.
//!
//! Every field is addressed by an inclusive, 0-based byte range. All record
//! types share the convention that column 0 holds the discriminator character.

use crate::error::{FeedError, Result};

/// Inclusive column range of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub start: usize,
    pub end: usize,
}

impl FieldRange {
    /// A range covering columns `start` through `end`, both included.
    pub const fn new(start: usize, end: usize) -> Self {
        FieldRange { start, end }
    }

    /// A range covering a single column.
    pub const fn single(position: usize) -> Self {
        FieldRange {
            start: position,
            end: position,
        }
    }

    /// Number of columns covered by the range.
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Minimum line length required to contain this field.
    pub const fn min_line_length(&self) -> usize {
        self.end + 1
    }

    /// Slices the field out of `line`.
    ///
    /// Fails if the line is too short or the range does not fall on
    /// character boundaries.
    pub fn extract<'a>(&self, line: &'a str) -> Result<&'a str> {
        line.get(self.start..=self.end)
            .ok_or(FeedError::FieldOutOfRange {
                start: self.start,
                end: self.end,
                actual: line.len(),
            })
    }
}

/// Digits before the implied decimal point of a rate field.
pub const RATE_INTEGER_PLACES: usize = 7;

/// Digits after the implied decimal point of a rate field.
pub const RATE_DECIMAL_PLACES: usize = 8;

/// Total width of a rate field.
pub const RATE_WIDTH: usize = RATE_INTEGER_PLACES + RATE_DECIMAL_PLACES;

/// Columns of the header line.
pub mod header {
    use super::FieldRange;

    /// First character of every header line.
    pub const DISCRIMINATOR: char = 'H';
    /// Feed generation timestamp.
    pub const DATETIME: FieldRange = FieldRange::new(1, 14);
    /// `chrono` format of [`DATETIME`].
    pub const DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";
    /// Single-character format version.
    pub const FORMAT_VERSION: FieldRange = FieldRange::single(15);

    /// The only header format version this parser understands.
    pub const SUPPORTED_VERSION: char = '1';

    /// Shortest line that holds every field.
    pub const MIN_LENGTH: usize = FORMAT_VERSION.min_line_length();
}

/// Columns of a detail line.
pub mod detail {
    use super::FieldRange;

    /// First character of every detail line.
    pub const DISCRIMINATOR: char = 'D';
    /// ISO 4217 numeric code of the source currency.
    pub const SOURCE_CURRENCY: FieldRange = FieldRange::new(1, 3);
    /// ISO 4217 numeric code of the reference currency.
    pub const REFERENCE_CURRENCY: FieldRange = FieldRange::new(4, 6);
    /// Minor-unit exponent of the source currency.
    pub const SOURCE_CURRENCY_EXPONENT: FieldRange = FieldRange::single(7);
    /// Rate class, `M` for mid-market.
    pub const RATE_CLASS: FieldRange = FieldRange::single(8);
    /// Rate format indicator, `D` for direct quotes.
    pub const RATE_FORMAT_INDICATOR: FieldRange = FieldRange::single(9);
    /// Buy rate, 15 digits with 8 implied decimals.
    pub const BUY_RATE: FieldRange = FieldRange::new(10, 24);
    /// Mid rate, same encoding as [`BUY_RATE`].
    pub const MID_RATE: FieldRange = FieldRange::new(25, 39);
    /// Sell rate, same encoding as [`BUY_RATE`].
    pub const SELL_RATE: FieldRange = FieldRange::new(40, 54);

    /// Shortest line that holds every field.
    pub const MIN_LENGTH: usize = SELL_RATE.min_line_length();
}

/// Columns of the trailer line.
pub mod trailer {
    use super::FieldRange;

    /// First character of the trailer line.
    pub const DISCRIMINATOR: char = 'T';
    /// Declared number of detail lines.
    pub const TOTAL_RECORDS: FieldRange = FieldRange::new(1, 6);
    /// Checksum over the detail lines.
    pub const HASH_TOTAL: FieldRange = FieldRange::new(7, 23);

    /// Shortest line that holds every field.
    pub const MIN_LENGTH: usize = HASH_TOTAL.min_line_length();
}

//! Record models for the fixed-width feed and the parsers that produce them.

use crate::codec::{decode_char, decode_datetime, decode_fixed_point_rate, decode_integer};
use crate::error::{FeedError, Result};
use crate::layout::{detail, header, trailer, FieldRange};
use crate::rate::Rate;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Record kind of a raw line, decided by its discriminator character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Detail,
    Trailer,
    Unknown,
}

impl LineKind {
    /// Classifies a trimmed line by its first character.
    ///
    /// Empty lines and unrecognised discriminators are [`LineKind::Unknown`].
    pub fn classify(line: &str) -> Self {
        match line.chars().next() {
            Some(header::DISCRIMINATOR) => LineKind::Header,
            Some(detail::DISCRIMINATOR) => LineKind::Detail,
            Some(trailer::DISCRIMINATOR) => LineKind::Trailer,
            _ => LineKind::Unknown,
        }
    }
}

/// Decoded first line of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderRecord {
    /// Generation time of the feed
    #[serde(rename = "date")]
    pub timestamp: NaiveDateTime,
}

impl HeaderRecord {
    /// Parses a header line.
    pub fn parse(line: &str) -> Result<Self> {
        if line.len() < header::MIN_LENGTH {
            return Err(FeedError::HeaderLength {
                expected: header::MIN_LENGTH,
                actual: line.len(),
                line: line.to_string(),
            });
        }

        let version = header::FORMAT_VERSION.extract(line).unwrap_or_default();
        if decode_char(version).ok() != Some(header::SUPPORTED_VERSION) {
            return Err(FeedError::UnsupportedHeaderVersion {
                found: version.to_string(),
                expected: header::SUPPORTED_VERSION,
            });
        }

        let timestamp = header::DATETIME
            .extract(line)
            .and_then(|field| decode_datetime(field, header::DATETIME_FORMAT))
            .map_err(|e| FeedError::HeaderDateTime {
                line: line.to_string(),
                source: Box::new(e),
            })?;

        Ok(HeaderRecord { timestamp })
    }
}

/// One exchange rate line of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    /// ISO 4217 numeric code of the source currency
    pub source_currency_code: u16,

    /// ISO 4217 numeric code of the currency the rates are quoted against
    pub reference_currency_code: u16,

    /// Minor-unit exponent of the source currency
    pub source_currency_exponent: u8,

    pub rate_class: char,

    pub rate_format_indicator: char,

    #[serde(rename = "buy_currency_conversion_rate")]
    pub buy_rate: Rate,

    #[serde(rename = "mid_currency_conversion_rate")]
    pub mid_rate: Rate,

    #[serde(rename = "sell_currency_conversion_rate")]
    pub sell_rate: Rate,
}

impl DetailRecord {
    /// Column names of the CSV output, in field order.
    pub const COLUMNS: [&'static str; 8] = [
        "source_currency_code",
        "reference_currency_code",
        "source_currency_exponent",
        "rate_class",
        "rate_format_indicator",
        "buy_currency_conversion_rate",
        "mid_currency_conversion_rate",
        "sell_currency_conversion_rate",
    ];

    /// Parses a detail line.
    ///
    /// Any single field failure rejects the whole record with
    /// [`FeedError::DetailField`]; partial records are never returned.
    pub fn parse(line: &str) -> Result<Self> {
        if line.len() < detail::MIN_LENGTH {
            return Err(FeedError::DetailLength {
                expected: detail::MIN_LENGTH,
                actual: line.len(),
                line: line.to_string(),
            });
        }

        Ok(DetailRecord {
            source_currency_code: detail_field(
                line,
                "source currency code",
                detail::SOURCE_CURRENCY,
                decode_integer,
            )?,
            reference_currency_code: detail_field(
                line,
                "reference currency code",
                detail::REFERENCE_CURRENCY,
                decode_integer,
            )?,
            source_currency_exponent: detail_field(
                line,
                "source currency exponent",
                detail::SOURCE_CURRENCY_EXPONENT,
                decode_integer,
            )?,
            rate_class: detail_field(line, "rate class", detail::RATE_CLASS, decode_char)?,
            rate_format_indicator: detail_field(
                line,
                "rate format indicator",
                detail::RATE_FORMAT_INDICATOR,
                decode_char,
            )?,
            buy_rate: detail_field(line, "buy rate", detail::BUY_RATE, decode_fixed_point_rate)?,
            mid_rate: detail_field(line, "mid rate", detail::MID_RATE, decode_fixed_point_rate)?,
            sell_rate: detail_field(line, "sell rate", detail::SELL_RATE, decode_fixed_point_rate)?,
        })
    }
}

/// Extracts and decodes one detail field, tagging failures with the field name.
fn detail_field<T>(
    line: &str,
    field: &'static str,
    range: FieldRange,
    decode: impl FnOnce(&str) -> Result<T>,
) -> Result<T> {
    range
        .extract(line)
        .and_then(decode)
        .map_err(|e| FeedError::DetailField {
            field,
            line: line.to_string(),
            source: Box::new(e),
        })
}

/// Decoded last line of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailerRecord {
    /// Declared number of detail lines in the feed
    pub total_records: u32,

    /// Checksum over the detail records. Not verified.
    pub hash_total: u64,
}

impl TrailerRecord {
    /// Parses a trailer line.
    pub fn parse(line: &str) -> Result<Self> {
        if line.len() < trailer::MIN_LENGTH {
            return Err(FeedError::TrailerLength {
                expected: trailer::MIN_LENGTH,
                actual: line.len(),
                line: line.to_string(),
            });
        }

        Ok(TrailerRecord {
            total_records: trailer_integer(line, "total records", trailer::TOTAL_RECORDS)?,
            hash_total: trailer_integer(line, "hash total", trailer::HASH_TOTAL)?,
        })
    }
}

fn trailer_integer<T: std::str::FromStr>(
    line: &str,
    field: &'static str,
    range: FieldRange,
) -> Result<T> {
    range
        .extract(line)
        .and_then(decode_integer)
        .map_err(|e| FeedError::TrailerField {
            field,
            line: line.to_string(),
            source: Box::new(e),
        })
}

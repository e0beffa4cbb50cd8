//! Field decoders for the fixed-width feed.
//!
//! Each decoder is strict: it either returns the typed value or a specific
//! [`FeedError`], and never coerces malformed content into a default.

use crate::error::{FeedError, Result};
use crate::rate::Rate;
use chrono::NaiveDateTime;
use std::str::FromStr;

/// Decodes a 15-digit fixed-point rate field.
pub fn decode_fixed_point_rate(field: &str) -> Result<Rate> {
    Rate::decode_fixed_point(field)
}

/// Decodes a date-time field that must match `format` exactly.
///
/// Only all-digit formats such as `%Y%m%d%H%M%S` are supported, so the field
/// is required to consist of ASCII digits before `chrono` sees it.
pub fn decode_datetime(field: &str, format: &'static str) -> Result<NaiveDateTime> {
    let invalid = || FeedError::InvalidTimestamp {
        value: field.to_string(),
        format,
    };

    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let timestamp = NaiveDateTime::parse_from_str(field, format).map_err(|_| invalid())?;

    // chrono accepts short numeric fields, so require an exact round trip
    if timestamp.format(format).to_string() != field {
        return Err(invalid());
    }

    Ok(timestamp)
}

/// Decodes an unsigned integer field made only of ASCII digits.
pub fn decode_integer<T: FromStr>(field: &str) -> Result<T> {
    let invalid = || FeedError::InvalidInteger {
        value: field.to_string(),
    };

    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    field.parse::<T>().map_err(|_| invalid())
}

/// Decodes a field that holds exactly one character.
pub fn decode_char(field: &str) -> Result<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(FeedError::InvalidChar {
            value: field.to_string(),
        }),
    }
}

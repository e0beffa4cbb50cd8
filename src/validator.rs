//! Structural validation of a feed's line sequence.
//!
//! Checks only the shape of the file (which record kinds appear, how often
//! and where). Field content is left to the record parsers.

use crate::error::{FeedError, Result};
use crate::record::LineKind;

/// Validates that `lines` form exactly one header, zero or more details and
/// exactly one trailer, in that order.
///
/// Lines must already be trimmed with blank lines removed. Checks run in a
/// fixed order and the first failure is returned.
pub fn validate_structure<S: AsRef<str>>(lines: &[S]) -> Result<()> {
    let kinds: Vec<LineKind> = lines
        .iter()
        .map(|line| LineKind::classify(line.as_ref()))
        .collect();

    let (first, last) = match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => (first.as_ref(), last.as_ref()),
        _ => return Err(FeedError::EmptyInput),
    };

    let headers = kinds.iter().filter(|k| **k == LineKind::Header).count();
    if headers != 1 {
        return Err(FeedError::HeaderCount { found: headers });
    }

    let trailers = kinds.iter().filter(|k| **k == LineKind::Trailer).count();
    if trailers != 1 {
        return Err(FeedError::TrailerCount { found: trailers });
    }

    if kinds[0] != LineKind::Header {
        return Err(FeedError::HeaderPosition {
            line: first.to_string(),
        });
    }

    if kinds[kinds.len() - 1] != LineKind::Trailer {
        return Err(FeedError::TrailerPosition {
            line: last.to_string(),
        });
    }

    // Header and trailer are pinned to the ends, so at least two lines exist
    if let Some(idx) = (1..lines.len() - 1).find(|&i| kinds[i] != LineKind::Detail) {
        return Err(FeedError::UnexpectedLineType {
            line_number: idx + 1,
            line: lines[idx].as_ref().to_string(),
        });
    }

    Ok(())
}

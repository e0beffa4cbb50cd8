//! End-to-end processing of one feed file.
//!
//! A run moves through structural validation, header/trailer decoding, the
//! trailer count check and finally detail decoding with filtering. Any
//! failure before the detail stage aborts the run with a [`FeedError`].

use crate::error::{FeedError, Result};
use crate::filter::FilterRules;
use crate::record::{DetailRecord, HeaderRecord, TrailerRecord};
use crate::validator::validate_structure;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::io::{BufRead, Write};

/// Result of a successful run.
///
/// Serializes with the field names the downstream import endpoint expects.
#[derive(Debug, Serialize)]
pub struct ParseOutcome {
    pub header: HeaderRecord,

    /// Admitted detail records in file order.
    #[serde(rename = "detail_records")]
    pub records: Vec<DetailRecord>,

    pub trailer: TrailerRecord,

    /// Detail records that decoded but were rejected by the filter.
    #[serde(skip)]
    pub excluded: usize,

    /// Detail lines that failed to decode.
    #[serde(skip)]
    pub malformed: Vec<FeedError>,
}

impl ParseOutcome {
    /// Number of detail lines the file contained, admitted or not.
    pub fn detail_line_count(&self) -> usize {
        self.records.len() + self.excluded + self.malformed.len()
    }

    /// Writes the admitted records as CSV, one row per record.
    ///
    /// The header row is always written, even when no record was admitted.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(DetailRecord::COLUMNS)?;

        for record in &self.records {
            csv_writer.serialize(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Feed processor holding the admission rules for a run.
///
/// Holds no per-run state; one processor may handle any number of feeds,
/// including concurrently from several threads.
#[derive(Debug, Clone, Default)]
pub struct FeedProcessor {
    rules: FilterRules,
}

impl FeedProcessor {
    /// Creates a processor with the production admission rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: FilterRules) -> Self {
        FeedProcessor { rules }
    }

    /// Reads all lines from `reader` and processes them.
    pub fn process_reader<R: BufRead>(&self, reader: R) -> Result<ParseOutcome> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        self.process_lines(lines)
    }

    /// Processes raw feed lines.
    ///
    /// Lines are trimmed and blank lines dropped before anything else, so
    /// they never count toward the trailer total.
    pub fn process_lines<I, S>(&self, lines: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .filter_map(|line| {
                let trimmed = line.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();

        self.run(&lines).map_err(|e| {
            error!("Aborting feed: {}", e);
            e
        })
    }

    fn run(&self, lines: &[String]) -> Result<ParseOutcome> {
        validate_structure(lines)?;
        debug!("Feed structure valid ({} lines)", lines.len());

        let (header_line, interior, trailer_line) = match lines {
            [first, interior @ .., last] => (first, interior, last),
            _ => return Err(FeedError::EmptyInput),
        };

        let header = HeaderRecord::parse(header_line)?;
        let trailer = TrailerRecord::parse(trailer_line)?;
        debug!(
            "Feed generated at {}, trailer declares {} records",
            header.timestamp, trailer.total_records
        );

        if trailer.total_records as usize != interior.len() {
            return Err(FeedError::RecordCountMismatch {
                declared: trailer.total_records,
                actual: interior.len(),
            });
        }

        verify_hash_total(&trailer, interior)?;

        let mut records = Vec::new();
        let mut excluded = 0;
        let mut malformed = Vec::new();

        for (idx, line) in interior.iter().enumerate() {
            let line_num = idx + 2; // 1-indexed, after the header line

            match DetailRecord::parse(line) {
                Ok(record) if self.rules.admits(Some(&record)) => records.push(record),
                Ok(record) => {
                    debug!(
                        "Line {}: Excluding rate {} -> {} (class {}, format {})",
                        line_num,
                        record.source_currency_code,
                        record.reference_currency_code,
                        record.rate_class,
                        record.rate_format_indicator
                    );
                    excluded += 1;
                }
                Err(e) => {
                    warn!("Line {}: {}", line_num, e);
                    malformed.push(e);
                }
            }
        }

        info!(
            "Processed {} detail records: {} admitted, {} excluded, {} malformed",
            interior.len(),
            records.len(),
            excluded,
            malformed.len()
        );

        Ok(ParseOutcome {
            header,
            records,
            trailer,
            excluded,
            malformed,
        })
    }
}

/// Checks the trailer hash total against the detail lines.
///
/// Hash verification is deliberately disabled for this feed: the check
/// always passes. It stays a named step so enabling it later touches only
/// this function.
fn verify_hash_total(trailer: &TrailerRecord, _detail_lines: &[String]) -> Result<()> {
    debug!("Skipping hash total verification ({})", trailer.hash_total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::io::Cursor;

    const HEADER: &str = "H201710211400191";

    fn detail(source: &str, reference: &str, class: char, indicator: char) -> String {
        format!(
            "D{}{}2{}{}000013654316250000013675000000000013675683750999999999999999",
            source, reference, class, indicator
        )
    }

    fn trailer(total: u32) -> String {
        format!("T{:06}00001731625193984", total)
    }

    #[test]
    fn test_admits_and_excludes() {
        let lines = vec![
            HEADER.to_string(),
            detail("978", "840", 'M', 'D'),
            detail("978", "777", 'M', 'D'),
            detail("826", "840", 'M', 'D'),
            trailer(3),
        ];

        let outcome = FeedProcessor::new().process_lines(&lines).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].source_currency_code, 978);
        assert_eq!(outcome.records[1].source_currency_code, 826);
        assert_eq!(outcome.excluded, 1);
        assert!(outcome.malformed.is_empty());
        assert_eq!(outcome.detail_line_count(), 3);
        assert_eq!(outcome.trailer.total_records, 3);
    }

    #[test]
    fn test_count_uses_lines_before_filtering() {
        let lines = vec![
            HEADER.to_string(),
            detail("978", "777", 'M', 'D'),
            detail("222", "840", 'M', 'D'),
            trailer(2),
        ];

        let outcome = FeedProcessor::new().process_lines(&lines).unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.excluded, 2);
    }

    #[test]
    fn test_count_mismatch() {
        let lines = vec![
            HEADER.to_string(),
            detail("978", "840", 'M', 'D'),
            trailer(2),
        ];

        let err = FeedProcessor::new().process_lines(&lines).unwrap_err();
        assert!(matches!(
            err,
            FeedError::RecordCountMismatch {
                declared: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_malformed_detail_does_not_abort() {
        let lines = vec![
            HEADER.to_string(),
            "D5557772MD0000136p4316250000013675000000000013675683750999999999999999".to_string(),
            "D555".to_string(),
            detail("978", "840", 'M', 'D'),
            trailer(3),
        ];

        let outcome = FeedProcessor::new().process_lines(&lines).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.malformed.len(), 2);
        assert_eq!(outcome.malformed[0].kind(), ErrorKind::DetailFieldError);
        assert_eq!(outcome.malformed[1].kind(), ErrorKind::DetailLengthError);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let input = format!(
            "\n{}\n\n   \n{}\n\t\n{}\n\n",
            HEADER,
            detail("978", "840", 'M', 'D'),
            trailer(1)
        );

        let outcome = FeedProcessor::new()
            .process_reader(Cursor::new(input))
            .unwrap();
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let lines = vec![
            format!("  {}  ", HEADER),
            format!("{}{}", detail("978", "840", 'M', 'D'), " ".repeat(40)),
            format!("{}   ", trailer(1)),
        ];

        let outcome = FeedProcessor::new().process_lines(&lines).unwrap();
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn test_header_failure_aborts() {
        let lines = vec![
            "H201713211400191".to_string(),
            detail("978", "840", 'M', 'D'),
            trailer(1),
        ];

        let err = FeedProcessor::new().process_lines(&lines).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HeaderDateTimeError);
    }

    #[test]
    fn test_trailer_failure_aborts() {
        let lines = vec![HEADER.to_string(), "T0001".to_string()];

        let err = FeedProcessor::new().process_lines(&lines).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TrailerLengthError);
    }

    #[test]
    fn test_only_whitespace_is_empty_input() {
        let err = FeedProcessor::new()
            .process_lines(["", "   ", "\t"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn test_custom_rules() {
        let rules = FilterRules::default().with_reference_currencies([777]);
        let lines = vec![
            HEADER.to_string(),
            detail("978", "840", 'M', 'D'),
            detail("978", "777", 'M', 'D'),
            trailer(2),
        ];

        let outcome = FeedProcessor::with_rules(rules).process_lines(&lines).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].reference_currency_code, 777);
    }

    #[test]
    fn test_write_output() {
        let lines = vec![
            HEADER.to_string(),
            detail("978", "840", 'M', 'D'),
            trailer(1),
        ];

        let outcome = FeedProcessor::new().process_lines(&lines).unwrap();
        let mut output = Vec::new();
        outcome.write_output(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        let mut rows = output_str.lines();
        assert_eq!(
            rows.next(),
            Some(
                "source_currency_code,reference_currency_code,source_currency_exponent,\
                 rate_class,rate_format_indicator,buy_currency_conversion_rate,\
                 mid_currency_conversion_rate,sell_currency_conversion_rate"
            )
        );
        assert_eq!(
            rows.next(),
            Some("978,840,2,M,D,136.54316250,136.75000000,136.75683750")
        );
        assert_eq!(rows.next(), None);
    }

    #[test]
    fn test_write_output_without_admitted_records() {
        let lines = vec![
            HEADER.to_string(),
            detail("978", "777", 'M', 'D'),
            trailer(1),
        ];

        let outcome = FeedProcessor::new().process_lines(&lines).unwrap();
        assert!(outcome.records.is_empty());

        let mut output = Vec::new();
        outcome.write_output(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, format!("{}\n", DetailRecord::COLUMNS.join(",")));
    }

    #[test]
    fn test_outcome_serializes_with_downstream_names() {
        let lines = vec![
            HEADER.to_string(),
            detail("978", "840", 'M', 'D'),
            detail("978", "777", 'M', 'D'),
            trailer(2),
        ];

        let outcome = FeedProcessor::new().process_lines(&lines).unwrap();
        let value = serde_json::to_value(&outcome).unwrap();

        let expected = json!({
            "header": { "date": "2017-10-21T14:00:19" },
            "detail_records": [{
                "source_currency_code": 978,
                "reference_currency_code": 840,
                "source_currency_exponent": 2,
                "rate_class": "M",
                "rate_format_indicator": "D",
                "buy_currency_conversion_rate": "136.54316250",
                "mid_currency_conversion_rate": "136.75000000",
                "sell_currency_conversion_rate": "136.75683750"
            }],
            "trailer": {
                "total_records": 2,
                "hash_total": 1731625193984u64
            }
        });
        assert_eq!(value, expected);
    }
}

//! Error types for feed parsing and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors that can occur while reading, validating or decoding a feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Failed to open or read the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write CSV output
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input path argument
    #[error("Missing input argument. Usage: fx-rate-feed <rates-file-or-directory>")]
    MissingArgument,

    /// Directory contains no file matching the feed naming convention
    #[error("No exchange rate file found in {}", path.display())]
    NoInputFile { path: PathBuf },

    /// Input has no lines left after blank lines are dropped
    #[error("Input contains no non-blank lines")]
    EmptyInput,

    /// Header discriminator appears zero or several times
    #[error("Expected exactly one header line, found {found}")]
    HeaderCount { found: usize },

    /// Trailer discriminator appears zero or several times
    #[error("Expected exactly one trailer line, found {found}")]
    TrailerCount { found: usize },

    /// The single header is not the first line
    #[error("First line is not a header: '{line}'")]
    HeaderPosition { line: String },

    /// The single trailer is not the last line
    #[error("Last line is not a trailer: '{line}'")]
    TrailerPosition { line: String },

    /// An interior line does not start with the detail discriminator
    #[error("Line {line_number} is not a detail record: '{line}'")]
    UnexpectedLineType { line_number: usize, line: String },

    /// Header line is shorter than its last field
    #[error("Header too short: expected at least {expected} characters, got {actual}: '{line}'")]
    HeaderLength {
        expected: usize,
        actual: usize,
        line: String,
    },

    /// Header carries a format version this parser does not read
    #[error("Unsupported header format version '{found}', expected '{expected}'")]
    UnsupportedHeaderVersion { found: String, expected: char },

    /// Header generation timestamp failed to decode
    #[error("Invalid header date-time in '{line}': {source}")]
    HeaderDateTime {
        line: String,
        #[source]
        source: Box<FeedError>,
    },

    /// Trailer line is shorter than its last field
    #[error("Trailer too short: expected at least {expected} characters, got {actual}: '{line}'")]
    TrailerLength {
        expected: usize,
        actual: usize,
        line: String,
    },

    /// A trailer field failed to decode
    #[error("Invalid trailer {field} in '{line}': {source}")]
    TrailerField {
        field: &'static str,
        line: String,
        #[source]
        source: Box<FeedError>,
    },

    /// Detail line is shorter than its last field
    #[error("Detail record too short: expected at least {expected} characters, got {actual}: '{line}'")]
    DetailLength {
        expected: usize,
        actual: usize,
        line: String,
    },

    /// A single detail field failed to decode; the whole record is rejected
    #[error("Invalid detail {field} in '{line}': {source}")]
    DetailField {
        field: &'static str,
        line: String,
        #[source]
        source: Box<FeedError>,
    },

    /// Rate field is not exactly 15 ASCII digits
    #[error("Invalid fixed-point rate '{value}': {reason}")]
    InvalidRateEncoding { value: String, reason: String },

    /// Timestamp field does not match its format exactly
    #[error("Invalid timestamp '{value}', expected format {format}")]
    InvalidTimestamp { value: String, format: &'static str },

    /// Integer field contains something other than ASCII digits
    #[error("Invalid integer '{value}'")]
    InvalidInteger { value: String },

    /// Single-column field is empty or holds more than one character
    #[error("Expected a single character, got '{value}'")]
    InvalidChar { value: String },

    /// Column range cannot be sliced out of the line
    #[error("Columns {start}-{end} not available in line of length {actual}")]
    FieldOutOfRange {
        start: usize,
        end: usize,
        actual: usize,
    },

    /// Trailer total does not match the number of detail lines in the file
    #[error("Trailer declares {declared} detail records but file contains {actual}")]
    RecordCountMismatch { declared: u32, actual: usize },
}

/// Fieldless classification of a [`FeedError`], for callers that only need the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    Csv,
    MissingArgument,
    NoInputFile,
    EmptyInput,
    HeaderCountError,
    TrailerCountError,
    HeaderPositionError,
    TrailerPositionError,
    UnexpectedLineType,
    HeaderLengthError,
    UnsupportedHeaderVersion,
    HeaderDateTimeError,
    TrailerLengthError,
    TrailerFieldError,
    DetailLengthError,
    DetailFieldError,
    InvalidRateEncoding,
    InvalidTimestamp,
    InvalidInteger,
    InvalidChar,
    FieldOutOfRange,
    RecordCountMismatch,
}

impl FeedError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedError::Io(_) => ErrorKind::Io,
            FeedError::Csv(_) => ErrorKind::Csv,
            FeedError::MissingArgument => ErrorKind::MissingArgument,
            FeedError::NoInputFile { .. } => ErrorKind::NoInputFile,
            FeedError::EmptyInput => ErrorKind::EmptyInput,
            FeedError::HeaderCount { .. } => ErrorKind::HeaderCountError,
            FeedError::TrailerCount { .. } => ErrorKind::TrailerCountError,
            FeedError::HeaderPosition { .. } => ErrorKind::HeaderPositionError,
            FeedError::TrailerPosition { .. } => ErrorKind::TrailerPositionError,
            FeedError::UnexpectedLineType { .. } => ErrorKind::UnexpectedLineType,
            FeedError::HeaderLength { .. } => ErrorKind::HeaderLengthError,
            FeedError::UnsupportedHeaderVersion { .. } => ErrorKind::UnsupportedHeaderVersion,
            FeedError::HeaderDateTime { .. } => ErrorKind::HeaderDateTimeError,
            FeedError::TrailerLength { .. } => ErrorKind::TrailerLengthError,
            FeedError::TrailerField { .. } => ErrorKind::TrailerFieldError,
            FeedError::DetailLength { .. } => ErrorKind::DetailLengthError,
            FeedError::DetailField { .. } => ErrorKind::DetailFieldError,
            FeedError::InvalidRateEncoding { .. } => ErrorKind::InvalidRateEncoding,
            FeedError::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            FeedError::InvalidInteger { .. } => ErrorKind::InvalidInteger,
            FeedError::InvalidChar { .. } => ErrorKind::InvalidChar,
            FeedError::FieldOutOfRange { .. } => ErrorKind::FieldOutOfRange,
            FeedError::RecordCountMismatch { .. } => ErrorKind::RecordCountMismatch,
        }
    }

    /// Returns the wrapped codec error for field-level failures.
    pub fn field_source(&self) -> Option<&FeedError> {
        match self {
            FeedError::HeaderDateTime { source, .. }
            | FeedError::TrailerField { source, .. }
            | FeedError::DetailField { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

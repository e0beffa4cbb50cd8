//! # FX Rate Feed
//!
//! Parser, structural validator and filter for fixed-width exchange rate
//! feed files made of one header line, any number of detail lines and one
//! trailer line.
//!
//! ## Design Principles
//!
//! - **Fixed-point rates**: 8 decimal places via `rust_decimal`, never floats
//! - **Shape before content**: the line sequence is validated before any field is decoded
//! - **Typed failures**: every decode failure is a specific [`FeedError`]
//! - **No hidden state**: processing is a pure function of the input lines
//!
//! ## Example
//!
//! ```
//! use fx_rate_feed::FeedProcessor;
//!
//! let lines = [
//!     "H201710211400191",
//!     "D9788402MD000000109234560000000109500000000000109765440999999999999999",
//!     "T00000100000000000000000",
//! ];
//! let outcome = FeedProcessor::new().process_lines(lines).unwrap();
//! assert_eq!(outcome.records.len(), 1);
//! ```

pub mod codec;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod layout;
pub mod processor;
pub mod rate;
pub mod record;
pub mod validator;

pub use discovery::{latest_in_dir, select_latest};
pub use error::{ErrorKind, FeedError, Result};
pub use filter::FilterRules;
pub use processor::{FeedProcessor, ParseOutcome};
pub use rate::Rate;
pub use record::{DetailRecord, HeaderRecord, LineKind, TrailerRecord};
pub use validator::validate_structure;

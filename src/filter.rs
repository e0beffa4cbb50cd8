//! Business admission rules for decoded detail records.

use crate::record::DetailRecord;
use std::collections::BTreeSet;

/// USD, the only reference currency rates are accepted against.
pub const DEFAULT_REFERENCE_CURRENCIES: [u16; 1] = [840];

/// Mid-market rate class.
pub const DEFAULT_RATE_CLASSES: [char; 1] = ['M'];

/// Direct quotation format.
pub const DEFAULT_RATE_FORMAT_INDICATORS: [char; 1] = ['D'];

/// Offshore yuan codes (157, 158), SVC and ESA.
pub const DEFAULT_DENIED_SOURCE_CURRENCIES: [u16; 4] = [157, 158, 222, 996];

/// Allow and deny lists that decide which detail records are forwarded.
///
/// A record is admitted only when its reference currency, rate class and
/// rate format indicator are all allowed and its source currency is not
/// denied. Rules hold no state, so applying them is repeatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRules {
    allowed_reference_currencies: BTreeSet<u16>,
    allowed_rate_classes: BTreeSet<char>,
    allowed_rate_format_indicators: BTreeSet<char>,
    denied_source_currencies: BTreeSet<u16>,
}

impl FilterRules {
    /// Creates rules from explicit sets.
    pub fn new(
        allowed_reference_currencies: impl IntoIterator<Item = u16>,
        allowed_rate_classes: impl IntoIterator<Item = char>,
        allowed_rate_format_indicators: impl IntoIterator<Item = char>,
        denied_source_currencies: impl IntoIterator<Item = u16>,
    ) -> Self {
        FilterRules {
            allowed_reference_currencies: allowed_reference_currencies.into_iter().collect(),
            allowed_rate_classes: allowed_rate_classes.into_iter().collect(),
            allowed_rate_format_indicators: allowed_rate_format_indicators.into_iter().collect(),
            denied_source_currencies: denied_source_currencies.into_iter().collect(),
        }
    }

    pub fn with_reference_currencies(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.allowed_reference_currencies = codes.into_iter().collect();
        self
    }

    pub fn with_rate_classes(mut self, classes: impl IntoIterator<Item = char>) -> Self {
        self.allowed_rate_classes = classes.into_iter().collect();
        self
    }

    pub fn with_rate_format_indicators(mut self, indicators: impl IntoIterator<Item = char>) -> Self {
        self.allowed_rate_format_indicators = indicators.into_iter().collect();
        self
    }

    pub fn with_denied_source_currencies(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.denied_source_currencies = codes.into_iter().collect();
        self
    }

    /// Returns `true` if the record should be forwarded.
    ///
    /// An absent record (one that failed to decode) is never admitted.
    pub fn admits(&self, record: Option<&DetailRecord>) -> bool {
        record.is_some_and(|r| {
            self.allowed_reference_currencies
                .contains(&r.reference_currency_code)
                && self.allowed_rate_classes.contains(&r.rate_class)
                && self
                    .allowed_rate_format_indicators
                    .contains(&r.rate_format_indicator)
                && !self.denied_source_currencies.contains(&r.source_currency_code)
        })
    }

    /// Returns the admitted records in their original order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<DetailRecord>
    where
        I: IntoIterator<Item = &'a DetailRecord>,
    {
        records
            .into_iter()
            .filter(|r| self.admits(Some(*r)))
            .cloned()
            .collect()
    }
}

impl Default for FilterRules {
    fn default() -> Self {
        FilterRules::new(
            DEFAULT_REFERENCE_CURRENCIES,
            DEFAULT_RATE_CLASSES,
            DEFAULT_RATE_FORMAT_INDICATORS,
            DEFAULT_DENIED_SOURCE_CURRENCIES,
        )
    }
}

//! Diagnostic counters for the direction cache.

use crate::cache::lookup::{ALL_FALLBACK_REASONS, FallbackReason};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheMetrics {
    lookups_total: u64,
    hits_total: u64,
    filled_total: u64,
    fills_total: u64,
    rows_read_total: u64,
    entries_added_total: u64,
    rows_discarded_total: u64,
    trims_total: u64,
    entries_trimmed_total: u64,
    rewinds_total: u64,
    monotonicity_violations_total: u64,
    fallback_no_data_total: u64,
    fallback_before_range_total: u64,
    fallback_exhausted_total: u64,
    fallback_not_covered_total: u64,
    fallback_unresolvable_total: u64,
    fallback_invalid_query_total: u64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_lookup(&mut self) {
        self.lookups_total += 1;
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits_total += 1;
    }

    pub(crate) fn record_filled(&mut self) {
        self.filled_total += 1;
    }

    pub(crate) fn record_fill(&mut self) {
        self.fills_total += 1;
    }

    pub(crate) fn record_row_read(&mut self) {
        self.rows_read_total += 1;
    }

    pub(crate) fn record_entry_added(&mut self) {
        self.entries_added_total += 1;
    }

    pub(crate) fn record_row_discarded(&mut self) {
        self.rows_discarded_total += 1;
    }

    pub(crate) fn record_trim(&mut self, dropped: usize) {
        self.trims_total += 1;
        self.entries_trimmed_total += dropped as u64;
    }

    pub(crate) fn record_rewind(&mut self) {
        self.rewinds_total += 1;
    }

    pub(crate) fn record_monotonicity_violation(&mut self) {
        self.monotonicity_violations_total += 1;
    }

    pub(crate) fn record_fallback(&mut self, reason: FallbackReason) {
        match reason {
            FallbackReason::NoDataForAntenna => self.fallback_no_data_total += 1,
            FallbackReason::BeforeRange => self.fallback_before_range_total += 1,
            FallbackReason::SourceExhausted => self.fallback_exhausted_total += 1,
            FallbackReason::NotCovered => self.fallback_not_covered_total += 1,
            FallbackReason::Unresolvable => self.fallback_unresolvable_total += 1,
            FallbackReason::InvalidQuery => self.fallback_invalid_query_total += 1,
        }
    }

    /// Every call to the lookup entry point.
    pub fn lookups_total(&self) -> u64 {
        self.lookups_total
    }

    /// Lookups answered from the cache without reading.
    pub fn hits_total(&self) -> u64 {
        self.hits_total
    }

    /// Lookups answered after reading ahead or rewinding.
    pub fn filled_total(&self) -> u64 {
        self.filled_total
    }

    /// Fill loop runs, including ones that read nothing.
    pub fn fills_total(&self) -> u64 {
        self.fills_total
    }

    /// Rows consumed by the forward cursor, across rewinds.
    pub fn rows_read_total(&self) -> u64 {
        self.rows_read_total
    }

    pub fn entries_added_total(&self) -> u64 {
        self.entries_added_total
    }

    pub fn rows_discarded_total(&self) -> u64 {
        self.rows_discarded_total
    }

    pub fn trims_total(&self) -> u64 {
        self.trims_total
    }

    pub fn entries_trimmed_total(&self) -> u64 {
        self.entries_trimmed_total
    }

    pub fn rewinds_total(&self) -> u64 {
        self.rewinds_total
    }

    pub fn monotonicity_violations_total(&self) -> u64 {
        self.monotonicity_violations_total
    }

    pub fn fallbacks_total(&self) -> u64 {
        ALL_FALLBACK_REASONS
            .iter()
            .map(|&reason| self.fallback_total(reason))
            .sum()
    }

    pub fn fallback_total(&self, reason: FallbackReason) -> u64 {
        match reason {
            FallbackReason::NoDataForAntenna => self.fallback_no_data_total,
            FallbackReason::BeforeRange => self.fallback_before_range_total,
            FallbackReason::SourceExhausted => self.fallback_exhausted_total,
            FallbackReason::NotCovered => self.fallback_not_covered_total,
            FallbackReason::Unresolvable => self.fallback_unresolvable_total,
            FallbackReason::InvalidQuery => self.fallback_invalid_query_total,
        }
    }
}

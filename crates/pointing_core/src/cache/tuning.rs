//! Per-antenna size bounds for the time-level cache.
//!
//! When an antenna's cache grows past `max_time_entries`, its oldest
//! entries are dropped until `min_time_entries` remain.

use std::fmt;

/// Default upper bound on entries per antenna.
pub const DEFAULT_MAX_TIME_ENTRIES: usize = 3000;
/// Default number of entries kept after a trim.
pub const DEFAULT_MIN_TIME_ENTRIES: usize = 1000;

/// Validated cache size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTuning {
    max_time_entries: usize,
    min_time_entries: usize,
}

impl Default for CacheTuning {
    fn default() -> Self {
        Self {
            max_time_entries: DEFAULT_MAX_TIME_ENTRIES,
            min_time_entries: DEFAULT_MIN_TIME_ENTRIES,
        }
    }
}

impl CacheTuning {
    /// Requires `1 <= min_time_entries <= max_time_entries`.
    pub fn new(max_time_entries: usize, min_time_entries: usize) -> Result<Self, TuningError> {
        if min_time_entries == 0 {
            return Err(TuningError::ZeroMinEntries);
        }
        if min_time_entries > max_time_entries {
            return Err(TuningError::MinExceedsMax {
                max_time_entries,
                min_time_entries,
            });
        }
        Ok(Self {
            max_time_entries,
            min_time_entries,
        })
    }

    pub fn max_time_entries(&self) -> usize {
        self.max_time_entries
    }

    pub fn min_time_entries(&self) -> usize {
        self.min_time_entries
    }
}

/// Rejected tuning values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningError {
    /// A trim must keep at least the newest entry.
    ZeroMinEntries,
    MinExceedsMax {
        max_time_entries: usize,
        min_time_entries: usize,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::ZeroMinEntries => write!(f, "min_time_entries must be at least 1"),
            TuningError::MinExceedsMax {
                max_time_entries,
                min_time_entries,
            } => write!(
                f,
                "min_time_entries ({min_time_entries}) exceeds max_time_entries ({max_time_entries})"
            ),
        }
    }
}

impl std::error::Error for TuningError {}

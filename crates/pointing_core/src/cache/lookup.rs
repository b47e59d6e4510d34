//! Lookup results returned by the direction cache.

use crate::pointing::Direction;

/// Why a lookup fell back to the caller's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// The antenna never appears in the source.
    NoDataForAntenna,
    /// The time predates every sample ever seen for the antenna.
    BeforeRange,
    /// Reading ahead reached EOF without a match.
    SourceExhausted,
    /// The antenna's samples run past the time with a gap around it; rows
    /// remain unread.
    NotCovered,
    /// A sample covers the time but its direction could not be built.
    Unresolvable,
    /// Non-finite time or antenna id outside the bank.
    InvalidQuery,
}

pub const ALL_FALLBACK_REASONS: &[FallbackReason] = &[
    FallbackReason::NoDataForAntenna,
    FallbackReason::BeforeRange,
    FallbackReason::SourceExhausted,
    FallbackReason::NotCovered,
    FallbackReason::Unresolvable,
    FallbackReason::InvalidQuery,
];

/// Where the returned direction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Already cached; no rows were read.
    CacheHit,
    /// Found after reading ahead (or after a rewind).
    Filled,
    Fallback(FallbackReason),
}

/// Answer to "where was antenna A pointing at time T".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionLookup {
    /// `true` iff `direction` came from the source rather than the fallback.
    pub found: bool,
    pub direction: Direction,
    pub resolution: Resolution,
}

impl DirectionLookup {
    pub(crate) fn from_cache(direction: Direction, resolution: Resolution) -> Self {
        Self {
            found: true,
            direction,
            resolution,
        }
    }

    pub(crate) fn fallback(direction: Direction, reason: FallbackReason) -> Self {
        Self {
            found: false,
            direction,
            resolution: Resolution::Fallback(reason),
        }
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self.resolution {
            Resolution::Fallback(reason) => Some(reason),
            Resolution::CacheHit | Resolution::Filled => None,
        }
    }
}

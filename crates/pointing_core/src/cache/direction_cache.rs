//! Pointing direction lookup over a forward-only source.
//!
//! **Lookup flow:**
//! 1. Classify the time against the antenna's cached entries.
//! 2. Hit -> return the cached direction.
//! 3. MissPrior -> if the time is at or after the earliest sample ever seen
//!    for the antenna, the entries were evicted: flush, rewind the cursor to
//!    row 0 and refill. Otherwise the time is before all data -> fallback.
//! 4. MissInternal / MissPost -> read forward from the cursor until an
//!    entry for the antenna covers the time, the source is exhausted, or the
//!    antenna's samples run past the time.
//! 5. Still unresolved -> return the caller's fallback direction. The fill
//!    loop's `FillStop` picks the reason: exhaustion is `SourceExhausted`
//!    (`NoDataForAntenna` if the antenna was never seen), running past the
//!    time is `NotCovered`.
//!
//! **Hard rules:**
//! - Never fails: every lookup returns a direction plus `found`.
//! - The cursor only moves forward, one row per read, except on rewind.
//! - Hits never read rows (beyond building a lazy direction once).

use crate::cache::antenna_level::AntennaLevelCache;
use crate::cache::lookup::{DirectionLookup, FallbackReason, Resolution};
use crate::cache::metrics::CacheMetrics;
use crate::cache::state::{CacheState, FillEvent, next_state};
use crate::cache::time_level::DirectionStatus;
use crate::cache::tuning::CacheTuning;
use crate::pointing::{Direction, Pointing, PointingSource};

/// Why a fill loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FillStop {
    /// A newly read entry for the antenna covers the time.
    Covered,
    /// The antenna's latest entry begins after the time.
    Overshot,
    /// No rows left.
    Exhausted,
}

pub struct PointingDirectionCache<'a, S: PointingSource + ?Sized> {
    source: &'a S,
    antennas: AntennaLevelCache,
    tuning: CacheTuning,
    /// Rows consumed since construction or the last rewind.
    last_row_read: usize,
    /// Per antenna, the start of the earliest validity window ever read.
    earliest_times: Vec<Option<f64>>,
    state: CacheState,
    metrics: CacheMetrics,
}

impl<'a, S: PointingSource + ?Sized> PointingDirectionCache<'a, S> {
    pub fn new(antenna_count: usize, source: &'a S) -> Self {
        Self::with_tuning(antenna_count, source, CacheTuning::default())
    }

    pub fn with_tuning(antenna_count: usize, source: &'a S, tuning: CacheTuning) -> Self {
        Self {
            source,
            antennas: AntennaLevelCache::new(antenna_count, tuning),
            tuning,
            last_row_read: 0,
            earliest_times: vec![None; antenna_count],
            state: CacheState::Cold,
            metrics: CacheMetrics::new(),
        }
    }

    /// Direction of `antenna` at `time`, or `fallback` with `found == false`.
    pub fn get_pointing_direction(
        &mut self,
        antenna: usize,
        time: f64,
        fallback: Direction,
    ) -> DirectionLookup {
        self.metrics.record_lookup();

        if antenna >= self.antennas.antenna_count() || !time.is_finite() {
            return self.fall_back(antenna, time, fallback, FallbackReason::InvalidQuery);
        }

        let stop = match self
            .antennas
            .get_pointing_direction(antenna, time, self.source)
        {
            DirectionStatus::Hit(direction) => {
                self.metrics.record_hit();
                return DirectionLookup::from_cache(direction, Resolution::CacheHit);
            }
            DirectionStatus::Unresolvable => {
                return self.fall_back(antenna, time, fallback, FallbackReason::Unresolvable);
            }
            DirectionStatus::MissPrior => match self.earliest_times[antenna] {
                Some(earliest) if time >= earliest => {
                    self.rewind_and_fill(antenna, time, earliest)
                }
                _ => {
                    return self.fall_back(antenna, time, fallback, FallbackReason::BeforeRange);
                }
            },
            DirectionStatus::MissInternal | DirectionStatus::MissPost => self.fill(antenna, time),
        };

        match self
            .antennas
            .get_pointing_direction(antenna, time, self.source)
        {
            DirectionStatus::Hit(direction) => {
                self.metrics.record_filled();
                DirectionLookup::from_cache(direction, Resolution::Filled)
            }
            DirectionStatus::Unresolvable => {
                self.fall_back(antenna, time, fallback, FallbackReason::Unresolvable)
            }
            DirectionStatus::MissPrior => {
                self.fall_back(antenna, time, fallback, FallbackReason::BeforeRange)
            }
            DirectionStatus::MissInternal | DirectionStatus::MissPost => {
                let reason = match stop {
                    FillStop::Exhausted if self.earliest_times[antenna].is_none() => {
                        FallbackReason::NoDataForAntenna
                    }
                    FillStop::Exhausted => FallbackReason::SourceExhausted,
                    FillStop::Overshot | FillStop::Covered => FallbackReason::NotCovered,
                };
                self.fall_back(antenna, time, fallback, reason)
            }
        }
    }

    // ─── Fill ───────────────────────────────────────────────────────────

    /// Read forward from the cursor on behalf of `antenna` at `time`.
    fn fill(&mut self, antenna: usize, time: f64) -> FillStop {
        self.metrics.record_fill();

        let n_rows = self.source.n_rows();
        if self.state.is_eof() || self.last_row_read >= n_rows {
            self.state = next_state(self.state, FillEvent::Exhausted);
            return FillStop::Exhausted;
        }

        self.state = next_state(self.state, FillEvent::Begin);
        let first_row = self.last_row_read;

        let stop = loop {
            if self.last_row_read >= n_rows {
                break FillStop::Exhausted;
            }
            if self.passed(antenna, time) {
                break FillStop::Overshot;
            }

            let row = self.last_row_read;
            let mut pointing = self.source.pointing_row(row, time, false);
            self.last_row_read += 1;
            self.metrics.record_row_read();

            // The cursor, not the record, is authoritative for the row handle.
            pointing.row = row;
            if self.accept(&pointing)
                && pointing.antenna_id == antenna
                && (time - pointing.time).abs() <= pointing.half_interval()
            {
                break FillStop::Covered;
            }
        };

        let event = if self.last_row_read >= n_rows {
            FillEvent::Exhausted
        } else {
            FillEvent::Satisfied
        };
        self.state = next_state(self.state, event);

        tracing::debug!(
            "PointingCacheFill antenna={} time={} rows_read={} stop={:?} state={:?}",
            antenna,
            time,
            self.last_row_read - first_row,
            stop,
            self.state
        );
        stop
    }

    /// Flush everything, move the cursor back to row 0 and refill.
    fn rewind_and_fill(&mut self, antenna: usize, time: f64, earliest: f64) -> FillStop {
        tracing::info!(
            "PointingCacheRewind antenna={} time={} earliest={} last_row_read={}",
            antenna,
            time,
            earliest,
            self.last_row_read
        );
        self.antennas.flush_times();
        self.earliest_times.fill(None);
        self.last_row_read = 0;
        self.state = next_state(self.state, FillEvent::Rewind);
        self.metrics.record_rewind();

        self.fill(antenna, time)
    }

    /// Whether `antenna`'s newest entry is further past `time` than the
    /// widest half-interval seen for the antenna.
    fn passed(&self, antenna: usize, time: f64) -> bool {
        self.antennas.antenna(antenna).is_some_and(|cache| {
            cache
                .latest()
                .is_some_and(|latest| latest.time() - cache.max_half_interval() > time)
        })
    }

    /// Insert a freshly read row. Returns `false` if the row was discarded.
    fn accept(&mut self, pointing: &Pointing) -> bool {
        let antenna = pointing.antenna_id;
        if !pointing.valid
            || !pointing.time.is_finite()
            || antenna >= self.antennas.antenna_count()
        {
            self.metrics.record_row_discarded();
            tracing::warn!(
                "PointingRowDiscarded row={} antenna={} time={} valid={}",
                pointing.row,
                antenna,
                pointing.time,
                pointing.valid
            );
            return false;
        }

        let window_start = pointing.time - pointing.half_interval();
        let earliest = &mut self.earliest_times[antenna];
        *earliest = Some(earliest.map_or(window_start, |e| e.min(window_start)));

        let Some(outcome) = self.antennas.add_entry(pointing) else {
            return false;
        };
        self.metrics.record_entry_added();

        if outcome.out_of_order {
            self.metrics.record_monotonicity_violation();
            tracing::warn!(
                "PointingTimeOrderViolation antenna={} row={} time={}",
                antenna,
                pointing.row,
                pointing.time
            );
        }
        if outcome.trimmed > 0 {
            self.metrics.record_trim(outcome.trimmed);
            tracing::debug!(
                "PointingCacheTrim antenna={} dropped={} retained={}",
                antenna,
                outcome.trimmed,
                self.tuning.min_time_entries()
            );
        }
        true
    }

    fn fall_back(
        &mut self,
        antenna: usize,
        time: f64,
        fallback: Direction,
        reason: FallbackReason,
    ) -> DirectionLookup {
        self.metrics.record_fallback(reason);
        tracing::debug!(
            "PointingFallback antenna={} time={} reason={:?}",
            antenna,
            time,
            reason
        );
        DirectionLookup::fallback(fallback, reason)
    }

    // ─── Introspection ──────────────────────────────────────────────────

    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Rows consumed from the source since construction or the last rewind.
    pub fn last_row_read(&self) -> usize {
        self.last_row_read
    }

    pub fn is_eof(&self) -> bool {
        self.state.is_eof()
    }

    pub fn antenna_count(&self) -> usize {
        self.antennas.antenna_count()
    }

    pub fn tuning(&self) -> CacheTuning {
        self.tuning
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Number of entries cached for `antenna` (0 for unknown antennas).
    pub fn cached_len(&self, antenna: usize) -> usize {
        self.antennas.antenna(antenna).map_or(0, |cache| cache.len())
    }

    /// Start of the earliest validity window read for `antenna`.
    pub fn earliest_time(&self, antenna: usize) -> Option<f64> {
        self.earliest_times.get(antenna).copied().flatten()
    }

    pub fn antenna_cache(&self) -> &AntennaLevelCache {
        &self.antennas
    }
}

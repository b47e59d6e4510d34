//! Time-ordered, size-bounded entry list for a single antenna.
//!
//! **Invariants:**
//! - Entries are in non-decreasing time order (callers append in source
//!   row order, which is time-ascending per antenna).
//! - `len() <= max_time_entries` after every insert; a trim leaves exactly
//!   `min_time_entries`.

use std::collections::VecDeque;

use crate::cache::entry::TimeLevelEntry;
use crate::cache::tuning::CacheTuning;
use crate::pointing::{Direction, Pointing, PointingSource};

/// Where a query time falls relative to the cached entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeClassification {
    /// Entry at this index covers the time.
    Hit(usize),
    /// Before the first entry's window.
    MissPrior,
    /// Between two entries' windows.
    MissInternal,
    /// After the last entry's window, or nothing cached.
    MissPost,
}

/// Result of a direction lookup against one antenna's entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectionStatus {
    Hit(Direction),
    /// An entry covers the time but its direction could not be built.
    Unresolvable,
    MissPrior,
    MissInternal,
    MissPost,
}

/// Side effects of a single insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddOutcome {
    /// Entries dropped by the amortized trim.
    pub trimmed: usize,
    /// The new entry is earlier than the previous newest entry.
    pub out_of_order: bool,
}

#[derive(Debug, Clone)]
pub struct TimeLevelCache {
    entries: VecDeque<TimeLevelEntry>,
    tuning: CacheTuning,
    /// Widest half-interval inserted since the last flush.
    max_half_interval: f64,
}

impl TimeLevelCache {
    pub fn new(tuning: CacheTuning) -> Self {
        Self {
            entries: VecDeque::new(),
            tuning,
            max_half_interval: 0.0,
        }
    }

    /// Append an entry built from `pointing`, trimming the oldest entries
    /// down to `min_time_entries` once `max_time_entries` is exceeded.
    ///
    /// Order is not enforced: an out-of-order row is appended anyway and
    /// reported through `AddOutcome::out_of_order`.
    pub fn add_entry(&mut self, pointing: &Pointing) -> AddOutcome {
        let out_of_order = self
            .entries
            .back()
            .is_some_and(|newest| pointing.time < newest.time());

        self.max_half_interval = self.max_half_interval.max(pointing.half_interval());
        self.entries.push_back(TimeLevelEntry::from_pointing(pointing));

        let mut trimmed = 0;
        if self.entries.len() > self.tuning.max_time_entries() {
            trimmed = self.entries.len() - self.tuning.min_time_entries();
            self.entries.drain(..trimmed);
        }

        AddOutcome {
            trimmed,
            out_of_order,
        }
    }

    /// Classify `time` against the cached windows.
    ///
    /// Every entry whose time lies within `max_half_interval` of `time` is
    /// tested, so a wide window is found even when narrower entries sit
    /// between it and `time`. When several cover it the nearest centre wins.
    pub fn classify(&self, time: f64) -> TimeClassification {
        if self.entries.is_empty() {
            return TimeClassification::MissPost;
        }

        let reach = self.max_half_interval;
        let lo = self.entries.partition_point(|entry| entry.time() < time - reach);
        let hi = self.entries.partition_point(|entry| entry.time() <= time + reach);

        let mut best: Option<(usize, f64)> = None;
        for index in lo..hi {
            let entry = &self.entries[index];
            if entry.matches(time) {
                let distance = (entry.time() - time).abs();
                if best.is_none_or(|(_, d)| distance < d) {
                    best = Some((index, distance));
                }
            }
        }

        if let Some((index, _)) = best {
            return TimeClassification::Hit(index);
        }
        if self.window_floor().is_some_and(|floor| time < floor) {
            TimeClassification::MissPrior
        } else if self.window_ceiling().is_some_and(|ceiling| time > ceiling) {
            TimeClassification::MissPost
        } else {
            TimeClassification::MissInternal
        }
    }

    /// Earliest window start among the cached entries.
    pub fn window_floor(&self) -> Option<f64> {
        let first = self.entries.front()?.time();
        self.entries
            .iter()
            .take_while(|entry| entry.time() <= first + self.max_half_interval)
            .map(TimeLevelEntry::window_start)
            .reduce(f64::min)
    }

    /// Latest window end among the cached entries.
    pub fn window_ceiling(&self) -> Option<f64> {
        let last = self.entries.back()?.time();
        self.entries
            .iter()
            .rev()
            .take_while(|entry| entry.time() >= last - self.max_half_interval)
            .map(TimeLevelEntry::window_end)
            .reduce(f64::max)
    }

    /// Look up the direction at `time`, building it through `source` if the
    /// matching entry has not been resolved yet.
    pub fn get_pointing_direction<S: PointingSource + ?Sized>(
        &mut self,
        time: f64,
        source: &S,
    ) -> DirectionStatus {
        match self.classify(time) {
            TimeClassification::Hit(index) => match self.entries[index].direction(source, time) {
                Some(direction) => DirectionStatus::Hit(direction),
                None => DirectionStatus::Unresolvable,
            },
            TimeClassification::MissPrior => DirectionStatus::MissPrior,
            TimeClassification::MissInternal => DirectionStatus::MissInternal,
            TimeClassification::MissPost => DirectionStatus::MissPost,
        }
    }

    /// Drop every entry.
    pub fn flush(&mut self) {
        self.entries.clear();
        self.max_half_interval = 0.0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_half_interval(&self) -> f64 {
        self.max_half_interval
    }

    pub fn earliest(&self) -> Option<&TimeLevelEntry> {
        self.entries.front()
    }

    pub fn latest(&self) -> Option<&TimeLevelEntry> {
        self.entries.back()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TimeLevelEntry> {
        self.entries.iter()
    }
}

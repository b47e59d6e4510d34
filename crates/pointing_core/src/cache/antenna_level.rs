//! Fixed bank of time-level caches, one per antenna.
//!
//! This layer only routes. It never reads rows ahead: on a miss it reports
//! the classification and leaves the read-ahead decision to the owner of
//! the source cursor.

use crate::cache::time_level::{AddOutcome, DirectionStatus, TimeLevelCache};
use crate::cache::tuning::CacheTuning;
use crate::pointing::{Pointing, PointingSource};

#[derive(Debug, Clone)]
pub struct AntennaLevelCache {
    antennas: Vec<TimeLevelCache>,
}

impl AntennaLevelCache {
    /// Allocate `antenna_count` empty caches. The bank is never resized.
    pub fn new(antenna_count: usize, tuning: CacheTuning) -> Self {
        Self {
            antennas: vec![TimeLevelCache::new(tuning); antenna_count],
        }
    }

    /// Route `pointing` to its antenna. Returns `None` when the antenna id
    /// is outside the bank.
    pub fn add_entry(&mut self, pointing: &Pointing) -> Option<AddOutcome> {
        self.antennas
            .get_mut(pointing.antenna_id)
            .map(|cache| cache.add_entry(pointing))
    }

    /// Classify `time` for `antenna`. Unknown antennas report `MissPost`
    /// (nothing cached).
    pub fn get_pointing_direction<S: PointingSource + ?Sized>(
        &mut self,
        antenna: usize,
        time: f64,
        source: &S,
    ) -> DirectionStatus {
        match self.antennas.get_mut(antenna) {
            Some(cache) => cache.get_pointing_direction(time, source),
            None => DirectionStatus::MissPost,
        }
    }

    /// Flush every antenna's entries.
    pub fn flush_times(&mut self) {
        for cache in &mut self.antennas {
            cache.flush();
        }
    }

    pub fn antenna(&self, antenna: usize) -> Option<&TimeLevelCache> {
        self.antennas.get(antenna)
    }

    pub fn antenna_count(&self) -> usize {
        self.antennas.len()
    }

    /// Total entries across all antennas.
    pub fn total_entries(&self) -> usize {
        self.antennas.iter().map(TimeLevelCache::len).sum()
    }
}

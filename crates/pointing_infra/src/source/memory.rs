//! In-memory pointing source.
//!
//! Rows come from a vector of records or from a JSON array of them; the
//! row index is the position in the array. Reads are counted so callers
//! can see how much work the cache pushed onto the source.

use std::cell::Cell;

use pointing_core::pointing::{Direction, DirectionFrame, Pointing, PointingSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameRecord {
    J2000,
    #[serde(rename = "azel")]
    AzEl,
    Galactic,
}

impl From<FrameRecord> for DirectionFrame {
    fn from(frame: FrameRecord) -> Self {
        match frame {
            FrameRecord::J2000 => DirectionFrame::J2000,
            FrameRecord::AzEl => DirectionFrame::AzEl,
            FrameRecord::Galactic => DirectionFrame::Galactic,
        }
    }
}

fn default_frame() -> FrameRecord {
    FrameRecord::J2000
}

fn default_valid() -> bool {
    true
}

/// One pointing row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointingRecord {
    pub antenna_id: usize,
    pub time: f64,
    pub interval: f64,
    pub longitude_rad: f64,
    pub latitude_rad: f64,
    #[serde(default = "default_frame")]
    pub frame: FrameRecord,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

impl PointingRecord {
    pub fn direction(&self) -> Direction {
        Direction::new(self.longitude_rad, self.latitude_rad, self.frame.into())
    }
}

/// Vector-backed `PointingSource`.
///
/// Directions are withheld on `as_measure == false` reads, the way a
/// table-backed source skips building them.
#[derive(Debug, Default)]
pub struct MemoryPointingSource {
    records: Vec<PointingRecord>,
    scan_reads: Cell<u64>,
    measure_reads: Cell<u64>,
}

impl MemoryPointingSource {
    pub fn new(records: Vec<PointingRecord>) -> Self {
        Self {
            records,
            scan_reads: Cell::new(0),
            measure_reads: Cell::new(0),
        }
    }

    /// Parse a JSON array of `PointingRecord`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<PointingRecord> = serde_json::from_str(json)?;
        tracing::debug!("MemoryPointingSourceLoaded rows={}", records.len());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[PointingRecord] {
        &self.records
    }

    /// Reads with `as_measure == false`.
    pub fn scan_reads(&self) -> u64 {
        self.scan_reads.get()
    }

    /// Reads with `as_measure == true`.
    pub fn measure_reads(&self) -> u64 {
        self.measure_reads.get()
    }
}

impl PointingSource for MemoryPointingSource {
    /// Panics if `row >= n_rows()`.
    fn pointing_row(&self, row: usize, _target_time: f64, as_measure: bool) -> Pointing {
        let record = &self.records[row];
        let counter = if as_measure {
            &self.measure_reads
        } else {
            &self.scan_reads
        };
        counter.set(counter.get() + 1);

        Pointing {
            antenna_id: record.antenna_id,
            direction: as_measure.then(|| record.direction()),
            interval: record.interval,
            row,
            time: record.time,
            valid: record.valid,
        }
    }

    fn n_rows(&self) -> usize {
        self.records.len()
    }
}

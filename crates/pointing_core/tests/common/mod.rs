//! Shared test source for direction cache integration tests.

#![allow(dead_code)]

use std::cell::Cell;

use pointing_core::pointing::{Direction, Pointing, PointingSource};

/// In-memory pointing table that defers directions when allowed and counts
/// every read.
pub struct TableSource {
    rows: Vec<Pointing>,
    scan_reads: Cell<usize>,
    measure_reads: Cell<usize>,
}

impl TableSource {
    pub fn new(rows: Vec<Pointing>) -> Self {
        Self {
            rows,
            scan_reads: Cell::new(0),
            measure_reads: Cell::new(0),
        }
    }

    /// Build from `(antenna, time, interval)` triples, row index in order.
    pub fn from_samples(samples: &[(usize, f64, f64)]) -> Self {
        let rows = samples
            .iter()
            .enumerate()
            .map(|(row, &(antenna_id, time, interval))| sample(row, antenna_id, time, interval))
            .collect();
        Self::new(rows)
    }

    /// Reads made with `as_measure == false` (cursor reads).
    pub fn scan_reads(&self) -> usize {
        self.scan_reads.get()
    }

    /// Reads made with `as_measure == true` (lazy direction builds).
    pub fn measure_reads(&self) -> usize {
        self.measure_reads.get()
    }

    pub fn total_reads(&self) -> usize {
        self.scan_reads() + self.measure_reads()
    }
}

impl PointingSource for TableSource {
    fn pointing_row(&self, row: usize, _target_time: f64, as_measure: bool) -> Pointing {
        let mut pointing = self.rows[row].clone();
        if as_measure {
            self.measure_reads.set(self.measure_reads.get() + 1);
        } else {
            self.scan_reads.set(self.scan_reads.get() + 1);
            pointing.direction = None;
        }
        pointing
    }

    fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

/// The direction stored for a sample: encodes antenna and time so tests can
/// tell rows apart.
pub fn direction_for(antenna_id: usize, time: f64) -> Direction {
    Direction::j2000(time / 100.0, antenna_id as f64 / 10.0)
}

pub fn sample(row: usize, antenna_id: usize, time: f64, interval: f64) -> Pointing {
    Pointing {
        antenna_id,
        direction: Some(direction_for(antenna_id, time)),
        interval,
        row,
        time,
        valid: true,
    }
}

pub fn fallback() -> Direction {
    Direction::j2000(-1.0, -1.0)
}

/// Five samples for antenna 0 at t = 0, 10, 20, 30, 40 (interval 2).
pub fn five_sample_source() -> TableSource {
    TableSource::from_samples(&[
        (0, 0.0, 2.0),
        (0, 10.0, 2.0),
        (0, 20.0, 2.0),
        (0, 30.0, 2.0),
        (0, 40.0, 2.0),
    ])
}

//! Pointing records and the sequential source they are read from.
//!
//! **Source contract:**
//! - Rows are indexed `0..n_rows()`.
//! - Each antenna's rows, taken in row order, are time-ascending. Rows of
//!   different antennas may interleave.
//! - Reading the same row twice yields the same logical record.
//! - `as_measure == false` lets the source skip building the direction.
//!
//! Row indices outside `0..n_rows()` are a caller bug; sources may panic.

use std::fmt;

use crate::pointing::Direction;

/// One row of the pointing table.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointing {
    /// Antenna the row belongs to.
    pub antenna_id: usize,
    /// Direction, or `None` when the source deferred building it.
    pub direction: Option<Direction>,
    /// Width of the validity window, centred on `time`.
    pub interval: f64,
    /// Row index in the source.
    pub row: usize,
    /// Centre time of the sample.
    pub time: f64,
    /// Source-side validity flag. Invalid rows are never cached.
    pub valid: bool,
}

impl Pointing {
    /// Half-width of the validity window. Negative intervals count as zero.
    pub fn half_interval(&self) -> f64 {
        half_width(self.interval)
    }
}

pub(crate) fn half_width(interval: f64) -> f64 {
    if interval > 0.0 { interval / 2.0 } else { 0.0 }
}

/// Sequential provider of pointing rows.
pub trait PointingSource {
    /// Read row `row`. `target_time` is the time the caller is interested in
    /// (sources that interpolate may use it). `as_measure == false` permits
    /// returning `direction: None`.
    fn pointing_row(&self, row: usize, target_time: f64, as_measure: bool) -> Pointing;

    /// Number of rows in the source.
    fn n_rows(&self) -> usize;
}

impl<S: PointingSource + ?Sized> PointingSource for &S {
    fn pointing_row(&self, row: usize, target_time: f64, as_measure: bool) -> Pointing {
        (**self).pointing_row(row, target_time, as_measure)
    }

    fn n_rows(&self) -> usize {
        (**self).n_rows()
    }
}

/// A row whose time is earlier than the previous row of the same antenna.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotonicityViolation {
    pub antenna_id: usize,
    /// Row that went backwards.
    pub row: usize,
    pub time: f64,
    /// Row and time of the antenna's previous sample.
    pub previous_row: usize,
    pub previous_time: f64,
}

impl fmt::Display for MonotonicityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "antenna {} row {} (t={}) precedes row {} (t={})",
            self.antenna_id, self.row, self.time, self.previous_row, self.previous_time
        )
    }
}

impl std::error::Error for MonotonicityViolation {}

/// Scan a whole source and report the first per-antenna time regression.
///
/// The cache does not run this itself: it is a full scan, meant for tests
/// and for pipelines that want to vet a table before trusting it.
pub fn audit_time_order<S: PointingSource + ?Sized>(
    source: &S,
) -> Result<(), MonotonicityViolation> {
    // antenna -> (row, time) of its latest sample
    let mut latest: Vec<Option<(usize, f64)>> = Vec::new();

    for row in 0..source.n_rows() {
        let pointing = source.pointing_row(row, f64::NAN, false);
        if !pointing.valid || !pointing.time.is_finite() {
            continue;
        }
        let antenna = pointing.antenna_id;
        if antenna >= latest.len() {
            latest.resize(antenna + 1, None);
        }
        if let Some((previous_row, previous_time)) = latest[antenna] {
            if pointing.time < previous_time {
                return Err(MonotonicityViolation {
                    antenna_id: antenna,
                    row,
                    time: pointing.time,
                    previous_row,
                    previous_time,
                });
            }
        }
        latest[antenna] = Some((row, pointing.time));
    }

    Ok(())
}

//! One cached pointing sample.
//!
//! Entries are inserted cheaply with the direction left unresolved; the
//! first lookup that lands on an entry reads the row back with
//! `as_measure == true` and keeps the result for the entry's lifetime.

use std::cmp::Ordering;

use crate::pointing::source::half_width;
use crate::pointing::{Direction, Pointing, PointingSource};

/// Direction slot of an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LazyDirection {
    /// Not built yet. The row handle is enough to build it on demand.
    Unresolved { row: usize, antenna_id: usize },
    /// Built. Never rebuilt.
    Resolved(Direction),
}

/// A cached, validity-windowed direction sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLevelEntry {
    direction: LazyDirection,
    row: usize,
    time: f64,
    interval: f64,
}

impl TimeLevelEntry {
    pub fn from_pointing(pointing: &Pointing) -> Self {
        let direction = match pointing.direction {
            Some(direction) => LazyDirection::Resolved(direction),
            None => LazyDirection::Unresolved {
                row: pointing.row,
                antenna_id: pointing.antenna_id,
            },
        };
        Self {
            direction,
            row: pointing.row,
            time: pointing.time,
            interval: pointing.interval,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.direction, LazyDirection::Resolved(_))
    }

    /// First instant covered by the validity window.
    pub fn window_start(&self) -> f64 {
        self.time - half_width(self.interval)
    }

    /// Last instant covered by the validity window.
    pub fn window_end(&self) -> f64 {
        self.time + half_width(self.interval)
    }

    /// `Equal` iff `|time - self.time| <= interval / 2`; otherwise whether
    /// the entry lies before (`Less`) or after (`Greater`) `time`.
    pub fn compare_to(&self, time: f64) -> Ordering {
        if (time - self.time).abs() <= half_width(self.interval) {
            Ordering::Equal
        } else if self.time < time {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    pub fn matches(&self, time: f64) -> bool {
        self.compare_to(time) == Ordering::Equal
    }

    /// Return the direction, building and memoizing it on first use.
    ///
    /// Returns `None` (and stays unresolved) if the source hands back a row
    /// without a direction even though one was requested.
    pub fn direction<S: PointingSource + ?Sized>(
        &mut self,
        source: &S,
        target_time: f64,
    ) -> Option<Direction> {
        match self.direction {
            LazyDirection::Resolved(direction) => Some(direction),
            LazyDirection::Unresolved { row, antenna_id } => {
                let pointing = source.pointing_row(row, target_time, true);
                match pointing.direction {
                    Some(direction) => {
                        self.direction = LazyDirection::Resolved(direction);
                        Some(direction)
                    }
                    None => {
                        tracing::warn!(
                            "PointingDirectionUnresolvable antenna={} row={}",
                            antenna_id,
                            row
                        );
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct OneRow {
        reads: Cell<usize>,
        direction: Option<Direction>,
    }

    impl PointingSource for OneRow {
        fn pointing_row(&self, row: usize, _target_time: f64, as_measure: bool) -> Pointing {
            self.reads.set(self.reads.get() + 1);
            Pointing {
                antenna_id: 0,
                direction: if as_measure { self.direction } else { None },
                interval: 2.0,
                row,
                time: 10.0,
                valid: true,
            }
        }

        fn n_rows(&self) -> usize {
            1
        }
    }

    fn deferred() -> Pointing {
        Pointing {
            antenna_id: 0,
            direction: None,
            interval: 2.0,
            row: 0,
            time: 10.0,
            valid: true,
        }
    }

    #[test]
    fn test_window_matching_is_inclusive() {
        let entry = TimeLevelEntry::from_pointing(&deferred());
        assert!(entry.matches(9.0));
        assert!(entry.matches(10.0));
        assert!(entry.matches(11.0));
        assert_eq!(entry.compare_to(8.999), Ordering::Greater);
        assert_eq!(entry.compare_to(11.001), Ordering::Less);
    }

    #[test]
    fn test_zero_interval_matches_only_centre() {
        let mut pointing = deferred();
        pointing.interval = 0.0;
        let entry = TimeLevelEntry::from_pointing(&pointing);
        assert!(entry.matches(10.0));
        assert!(!entry.matches(10.0001));
        assert_eq!(entry.window_start(), entry.window_end());
    }

    #[test]
    fn test_direction_is_memoized() {
        let source = OneRow {
            reads: Cell::new(0),
            direction: Some(Direction::j2000(1.0, 0.5)),
        };
        let mut entry = TimeLevelEntry::from_pointing(&deferred());
        assert!(!entry.is_resolved());

        assert_eq!(entry.direction(&source, 10.0), Some(Direction::j2000(1.0, 0.5)));
        assert_eq!(entry.direction(&source, 10.5), Some(Direction::j2000(1.0, 0.5)));
        assert_eq!(source.reads.get(), 1);
        assert!(entry.is_resolved());
    }

    #[test]
    fn test_eager_direction_needs_no_read() {
        let source = OneRow {
            reads: Cell::new(0),
            direction: None,
        };
        let mut pointing = deferred();
        pointing.direction = Some(Direction::j2000(0.1, 0.2));
        let mut entry = TimeLevelEntry::from_pointing(&pointing);
        assert_eq!(entry.direction(&source, 10.0), Some(Direction::j2000(0.1, 0.2)));
        assert_eq!(source.reads.get(), 0);
    }

    #[test]
    fn test_missing_direction_stays_unresolved() {
        let source = OneRow {
            reads: Cell::new(0),
            direction: None,
        };
        let mut entry = TimeLevelEntry::from_pointing(&deferred());
        assert_eq!(entry.direction(&source, 10.0), None);
        assert!(!entry.is_resolved());
    }
}

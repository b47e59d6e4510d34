//! Pointing value types and the source contract.

pub mod direction;
pub mod source;

pub use direction::{Direction, DirectionFrame};
pub use source::{MonotonicityViolation, Pointing, PointingSource, audit_time_order};

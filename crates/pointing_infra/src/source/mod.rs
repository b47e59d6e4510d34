//! `PointingSource` adapters.

pub mod memory;

pub use memory::{FrameRecord, MemoryPointingSource, PointingRecord};

//! Two-level pointing direction cache: per-antenna time-ordered entries
//! behind a facade that owns the forward read cursor.

pub mod antenna_level;
pub mod direction_cache;
pub mod entry;
pub mod lookup;
pub mod metrics;
pub mod state;
pub mod time_level;
pub mod tuning;

pub use antenna_level::AntennaLevelCache;
pub use direction_cache::PointingDirectionCache;
pub use entry::TimeLevelEntry;
pub use lookup::{ALL_FALLBACK_REASONS, DirectionLookup, FallbackReason, Resolution};
pub use metrics::CacheMetrics;
pub use state::{CacheState, FillEvent, next_state};
pub use time_level::{AddOutcome, DirectionStatus, TimeClassification, TimeLevelCache};
pub use tuning::{
    CacheTuning, DEFAULT_MAX_TIME_ENTRIES, DEFAULT_MIN_TIME_ENTRIES, TuningError,
};

//! Direction cache configuration with documented defaults.
//!
//! If a parameter is missing at runtime and has a default, that default is
//! applied. If no default exists, resolution fails closed.
//!
//! JSON form:
//! `{"antenna_count": 27, "max_time_entries": 3000, "min_time_entries": 1000}`.
//! `antenna_count` is required; the tuning keys are optional.

use std::fmt;

use pointing_core::cache::{
    CacheTuning, DEFAULT_MAX_TIME_ENTRIES, DEFAULT_MIN_TIME_ENTRIES, PointingDirectionCache,
    TuningError,
};
use pointing_core::pointing::PointingSource;
use serde::Deserialize;

/// Configuration parameters of the direction cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    /// Number of antennas in the bank. Depends on the array; no default.
    AntennaCount,
    /// Upper bound on cached entries per antenna.
    MaxTimeEntries,
    /// Entries kept per antenna after a trim.
    MinTimeEntries,
}

pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::AntennaCount,
    ConfigParam::MaxTimeEntries,
    ConfigParam::MinTimeEntries,
];

/// Error when a required parameter is missing and has no default.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config fail-closed: '{}' is missing and has no default ({})",
            self.param_name, self.reason
        )
    }
}

impl std::error::Error for MissingConfigError {}

/// Returns the default for a parameter, or `None` if none exists.
pub fn default_value(param: ConfigParam) -> Option<usize> {
    match param {
        ConfigParam::AntennaCount => None,
        ConfigParam::MaxTimeEntries => Some(DEFAULT_MAX_TIME_ENTRIES),
        ConfigParam::MinTimeEntries => Some(DEFAULT_MIN_TIME_ENTRIES),
    }
}

/// Returns the snake_case name for a parameter (the JSON key).
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::AntennaCount => "antenna_count",
        ConfigParam::MaxTimeEntries => "max_time_entries",
        ConfigParam::MinTimeEntries => "min_time_entries",
    }
}

/// Resolve a parameter: the provided value if present, else its default.
pub fn resolve_config_value(
    param: ConfigParam,
    provided: Option<usize>,
) -> Result<usize, MissingConfigError> {
    match provided {
        Some(value) => Ok(value),
        None => default_value(param).ok_or(MissingConfigError {
            param_name: param_name(param),
            reason: "no default; caller must fail-closed",
        }),
    }
}

// ─── JSON loading ───────────────────────────────────────────────────────

/// Counts are unsigned integers; serde rejects fractional or negative
/// values while parsing.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CacheConfigFile {
    #[serde(default)]
    antenna_count: Option<usize>,
    #[serde(default)]
    max_time_entries: Option<usize>,
    #[serde(default)]
    min_time_entries: Option<usize>,
}

/// Failure to build a `CacheConfig`.
#[derive(Debug)]
pub enum ConfigError {
    /// Not valid JSON, unknown keys, or a count that is not a
    /// non-negative integer.
    Parse(serde_json::Error),
    Missing(MissingConfigError),
    Invalid(TuningError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "cache config is not valid: {err}"),
            ConfigError::Missing(err) => write!(f, "{err}"),
            ConfigError::Invalid(err) => write!(f, "invalid cache tuning: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Missing(err) => Some(err),
            ConfigError::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<MissingConfigError> for ConfigError {
    fn from(err: MissingConfigError) -> Self {
        ConfigError::Missing(err)
    }
}

impl From<TuningError> for ConfigError {
    fn from(err: TuningError) -> Self {
        ConfigError::Invalid(err)
    }
}

/// Resolved direction cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub antenna_count: usize,
    pub tuning: CacheTuning,
}

impl CacheConfig {
    /// A cache over `source` sized and tuned by this configuration.
    pub fn build<'a, S: PointingSource + ?Sized>(
        &self,
        source: &'a S,
    ) -> PointingDirectionCache<'a, S> {
        PointingDirectionCache::with_tuning(self.antenna_count, source, self.tuning)
    }
}

/// Parse cache configuration from JSON, applying defaults for missing
/// tuning keys. A missing `antenna_count` fails closed.
pub fn load_cache_config_json(json: &str) -> Result<CacheConfig, ConfigError> {
    let file: CacheConfigFile = serde_json::from_str(json)?;
    let antenna_count = resolve_config_value(ConfigParam::AntennaCount, file.antenna_count)?;
    let max = resolve_config_value(ConfigParam::MaxTimeEntries, file.max_time_entries)?;
    let min = resolve_config_value(ConfigParam::MinTimeEntries, file.min_time_entries)?;
    let tuning = CacheTuning::new(max, min)?;
    tracing::debug!(
        "PointingCacheConfig antenna_count={} max_time_entries={} min_time_entries={}",
        antenna_count,
        tuning.max_time_entries(),
        tuning.min_time_entries()
    );
    Ok(CacheConfig {
        antenna_count,
        tuning,
    })
}

//! Tests for cache configuration defaults and JSON loading.

use pointing_core::cache::{CacheTuning, TuningError};
use pointing_infra::config::{
    ALL_PARAMS, CacheConfig, ConfigError, ConfigParam, default_value, load_cache_config_json,
    param_name, resolve_config_value,
};

// --- Defaults ---

#[test]
fn test_missing_max_time_entries_applies_default_3000() {
    let result = resolve_config_value(ConfigParam::MaxTimeEntries, None);
    assert_eq!(result.unwrap(), 3000);
}

#[test]
fn test_missing_min_time_entries_applies_default_1000() {
    let result = resolve_config_value(ConfigParam::MinTimeEntries, None);
    assert_eq!(result.unwrap(), 1000);
}

#[test]
fn test_provided_value_wins_over_default() {
    let result = resolve_config_value(ConfigParam::MaxTimeEntries, Some(50));
    assert_eq!(result.unwrap(), 50);
}

#[test]
fn test_all_defaulted_params_resolve_through_resolver() {
    for &param in ALL_PARAMS {
        assert!(!param_name(param).is_empty());
        let Some(default) = default_value(param) else {
            continue;
        };
        assert_eq!(resolve_config_value(param, None).unwrap(), default, "{:?}", param);
    }
}

#[test]
fn test_missing_antenna_count_fails_closed() {
    assert_eq!(default_value(ConfigParam::AntennaCount), None);
    let err = resolve_config_value(ConfigParam::AntennaCount, None).unwrap_err();
    assert_eq!(err.param_name, "antenna_count");
    let msg = format!("{err}");
    assert!(msg.contains("antenna_count"), "error must identify the parameter");
    assert!(msg.contains("fail-closed"), "error must state fail-closed");

    assert_eq!(
        resolve_config_value(ConfigParam::AntennaCount, Some(27)).unwrap(),
        27
    );
}

// --- JSON loading ---

#[test]
fn test_antenna_count_alone_yields_default_tuning() {
    let config = load_cache_config_json(r#"{"antenna_count": 4}"#).unwrap();
    assert_eq!(
        config,
        CacheConfig {
            antenna_count: 4,
            tuning: CacheTuning::default(),
        }
    );
}

#[test]
fn test_empty_object_is_missing_antenna_count() {
    let err = load_cache_config_json("{}").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Missing(ref missing) if missing.param_name == "antenna_count"
    ));
    assert!(err.to_string().contains("fail-closed"));
}

#[test]
fn test_explicit_values_are_used() {
    let config = load_cache_config_json(
        r#"{"antenna_count": 2, "max_time_entries": 64, "min_time_entries": 16}"#,
    )
    .unwrap();
    assert_eq!(config.antenna_count, 2);
    assert_eq!(config.tuning.max_time_entries(), 64);
    assert_eq!(config.tuning.min_time_entries(), 16);
}

#[test]
fn test_partial_config_mixes_with_defaults() {
    let config =
        load_cache_config_json(r#"{"antenna_count": 1, "max_time_entries": 5000}"#).unwrap();
    assert_eq!(config.tuning.max_time_entries(), 5000);
    assert_eq!(config.tuning.min_time_entries(), 1000);
}

#[test]
fn test_min_above_max_is_rejected() {
    let err =
        load_cache_config_json(r#"{"antenna_count": 1, "max_time_entries": 500}"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid(TuningError::MinExceedsMax {
            max_time_entries: 500,
            min_time_entries: 1000
        })
    ));
}

#[test]
fn test_zero_min_is_rejected() {
    let err =
        load_cache_config_json(r#"{"antenna_count": 1, "min_time_entries": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(TuningError::ZeroMinEntries)));
}

#[test]
fn test_fractional_and_negative_counts_are_parse_errors() {
    let err =
        load_cache_config_json(r#"{"antenna_count": 1, "max_time_entries": 12.5}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err =
        load_cache_config_json(r#"{"antenna_count": 1, "min_time_entries": -3}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = load_cache_config_json(r#"{"antenna_count": 2.0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_malformed_json_and_unknown_keys_are_parse_errors() {
    assert!(matches!(
        load_cache_config_json("not json").unwrap_err(),
        ConfigError::Parse(_)
    ));
    assert!(matches!(
        load_cache_config_json(r#"{"antenna_count": 1, "max_entries": 10}"#).unwrap_err(),
        ConfigError::Parse(_)
    ));
}

//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, the compact
//! `sets:assoc:hit` level syntax, and validation.

use memsim_core::common::{CacheLevel, ConfigError};
use memsim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.icache, LevelConfig::new(256, 2, 2));
    assert_eq!(config.dcache, LevelConfig::new(256, 2, 2));
    assert_eq!(config.l2, LevelConfig::new(512, 8, 10));
    assert_eq!(config.block_size, 64);
    assert_eq!(config.mem_speed, 100);
    assert_eq!(config.stream_buffer_entries, 4);
    assert_eq!(config.prefetch_degree, 1);
    assert!(!config.inclusive);
    assert!(!config.prefetch);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_level_helpers() {
    assert!(!LevelConfig::disabled().is_enabled());
    assert!(LevelConfig::default().is_enabled());
    assert_eq!(LevelConfig::new(256, 2, 1).size_bytes(64), 32 * 1024);
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_level_json() {
    let config = Config::from_json(r#"{ "icache": { "sets": 64 }, "l2": { "sets": 0 } }"#).unwrap();
    assert_eq!(config.icache, LevelConfig::new(64, 2, 2));
    assert!(!config.l2.is_enabled());
}

#[test]
fn test_partial_l2_json_uses_l2_defaults() {
    let config = Config::from_json(r#"{ "l2": { "sets": 1024 } }"#).unwrap();
    assert_eq!(config.l2, LevelConfig::new(1024, 8, 10));

    let config = Config::from_json(r#"{ "l2": { "hit_time": 12 } }"#).unwrap();
    assert_eq!(config.l2, LevelConfig::new(512, 8, 12));

    let config = Config::from_json(r#"{ "l2": { "sets": 512 } }"#).unwrap();
    assert_eq!(config.l2, Config::from_json("{}").unwrap().l2);
}

#[test]
fn test_json_round_trip() {
    let config = Config {
        prefetch: true,
        inclusive: true,
        block_size: 32,
        ..Config::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}

#[test]
fn test_malformed_json_rejected() {
    assert!(Config::from_json(r#"{ "block_size": "big" }"#).is_err());
}

#[test]
fn test_level_accessor() {
    let config = Config {
        dcache: LevelConfig::new(8, 1, 3),
        ..Config::default()
    };
    assert_eq!(config.level(CacheLevel::DCache).hit_time, 3);
    assert_eq!(config.level(CacheLevel::L2), &config.l2);
}

// ══════════════════════════════════════════════════════════
// sets:assoc:hit parsing
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("256:2:1", LevelConfig::new(256, 2, 1))]
#[case("0:0:0", LevelConfig::disabled())]
#[case(" 1024 : 8 : 10 ", LevelConfig::new(1024, 8, 10))]
fn test_level_from_str(#[case] input: &str, #[case] expected: LevelConfig) {
    assert_eq!(input.parse::<LevelConfig>(), Ok(expected));
}

#[rstest]
#[case("")]
#[case("256")]
#[case("256:2")]
#[case("256:2:1:9")]
#[case("a:2:1")]
#[case("256:-2:1")]
fn test_level_from_str_rejects(#[case] input: &str) {
    assert_eq!(
        input.parse::<LevelConfig>(),
        Err(ConfigError::MalformedLevel(input.to_string()))
    );
}

// ══════════════════════════════════════════════════════════
// Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0)]
#[case(48)]
#[case(100)]
fn test_block_size_must_be_power_of_two(#[case] block_size: u32) {
    let config = Config {
        block_size,
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::BlockSizeNotPowerOfTwo(block_size))
    );
}

#[test]
fn test_sets_must_be_power_of_two() {
    let config = Config {
        icache: LevelConfig::new(3, 1, 1),
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::SetsNotPowerOfTwo {
            level: CacheLevel::ICache,
            sets: 3
        })
    );
}

#[test]
fn test_enabled_level_needs_ways() {
    let config = Config {
        dcache: LevelConfig::new(4, 0, 1),
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroWays {
            level: CacheLevel::DCache
        })
    );
}

#[test]
fn test_disabled_level_ignores_ways() {
    let config = Config {
        l2: LevelConfig::new(0, 0, 0),
        ..Config::default()
    };
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_prefetch_needs_stream_buffer() {
    let config = Config {
        prefetch: true,
        stream_buffer_entries: 0,
        ..Config::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::EmptyStreamBuffer));

    let idle = Config {
        prefetch: false,
        stream_buffer_entries: 0,
        ..Config::default()
    };
    assert_eq!(idle.validate(), Ok(()));
}

#[test]
fn test_error_messages() {
    let err = ConfigError::SetsNotPowerOfTwo {
        level: CacheLevel::L2,
        sets: 6,
    };
    assert_eq!(err.to_string(), "L2$ sets must be zero or a power of two, got 6");
    assert_eq!(
        ConfigError::MalformedLevel("x".into()).to_string(),
        "malformed level descriptor `x`, expected sets:assoc:hit"
    );
}

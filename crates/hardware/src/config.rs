//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines the structures used to parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline geometry and timing for each level and main memory.
//! 2. **Structures:** Per-level (`LevelConfig`) and hierarchy-wide (`Config`) settings.
//! 3. **Parsing:** JSON deserialization and the compact `sets:assoc:hit` level syntax.
//! 4. **Validation:** Power-of-two and capacity checks run once before simulation.
//!
//! Configuration is supplied as JSON by the driver, built from command-line flags,
//! or taken from `Config::default()`.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::common::{CacheLevel, ConfigError};

/// Default configuration constants for the simulator.
///
/// These values define the baseline hierarchy when not explicitly
/// overridden by the driver.
mod defaults {
    /// Default L1 set count.
    pub const L1_SETS: u32 = 256;

    /// Default L1 associativity.
    pub const L1_WAYS: u32 = 2;

    /// Default L1 hit time in cycles.
    pub const L1_HIT_TIME: u64 = 2;

    /// Default L2 set count.
    pub const L2_SETS: u32 = 512;

    /// Default L2 associativity.
    pub const L2_WAYS: u32 = 8;

    /// Default L2 hit time in cycles.
    pub const L2_HIT_TIME: u64 = 10;

    /// Default block (line) size in bytes.
    pub const BLOCK_SIZE: u32 = 64;

    /// Default main memory latency in cycles.
    pub const MEM_SPEED: u64 = 100;

    /// Default stream buffer capacity in blocks.
    pub const STREAM_BUFFER_ENTRIES: usize = 4;

    /// Default prefetch degree (blocks installed per trigger).
    pub const PREFETCH_DEGREE: usize = 1;
}

/// Geometry and timing for one cache level.
///
/// `sets == 0` disables the level: references pass straight through to the
/// next level and no counters are touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LevelConfig {
    /// Number of sets (power of two, or zero to disable)
    #[serde(default = "LevelConfig::default_sets")]
    pub sets: u32,

    /// Associativity (lines per set)
    #[serde(default = "LevelConfig::default_ways")]
    pub ways: u32,

    /// Hit time in cycles
    #[serde(default = "LevelConfig::default_hit_time")]
    pub hit_time: u64,
}

impl LevelConfig {
    /// Returns the default set count.
    fn default_sets() -> u32 {
        defaults::L1_SETS
    }

    /// Returns the default associativity.
    fn default_ways() -> u32 {
        defaults::L1_WAYS
    }

    /// Returns the default hit time.
    fn default_hit_time() -> u64 {
        defaults::L1_HIT_TIME
    }

    /// Creates a level with explicit geometry.
    pub const fn new(sets: u32, ways: u32, hit_time: u64) -> Self {
        Self {
            sets,
            ways,
            hit_time,
        }
    }

    /// A disabled level (zero sets).
    pub const fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    /// Default geometry for the unified L2.
    pub const fn l2_default() -> Self {
        Self::new(defaults::L2_SETS, defaults::L2_WAYS, defaults::L2_HIT_TIME)
    }

    /// Whether the level holds any lines.
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.sets != 0
    }

    /// Total capacity in bytes for the given block size.
    pub const fn size_bytes(&self, block_size: u32) -> u64 {
        self.sets as u64 * self.ways as u64 * block_size as u64
    }

    fn validate(&self, level: CacheLevel) -> Result<(), ConfigError> {
        if self.sets != 0 && !self.sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo {
                level,
                sets: self.sets,
            });
        }
        if self.is_enabled() && self.ways == 0 {
            return Err(ConfigError::ZeroWays { level });
        }
        Ok(())
    }
}

/// Wire form of the `l2` level: missing fields take the L2 defaults rather
/// than the L1 ones.
#[derive(Deserialize)]
struct L2Fields {
    #[serde(default = "L2Fields::default_sets")]
    sets: u32,
    #[serde(default = "L2Fields::default_ways")]
    ways: u32,
    #[serde(default = "L2Fields::default_hit_time")]
    hit_time: u64,
}

impl L2Fields {
    const fn default_sets() -> u32 {
        defaults::L2_SETS
    }

    const fn default_ways() -> u32 {
        defaults::L2_WAYS
    }

    const fn default_hit_time() -> u64 {
        defaults::L2_HIT_TIME
    }
}

fn deserialize_l2<'de, D>(deserializer: D) -> Result<LevelConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let f = L2Fields::deserialize(deserializer)?;
    Ok(LevelConfig::new(f.sets, f.ways, f.hit_time))
}

impl Default for LevelConfig {
    /// Creates a default L1 level configuration.
    fn default() -> Self {
        Self::new(defaults::L1_SETS, defaults::L1_WAYS, defaults::L1_HIT_TIME)
    }
}

impl FromStr for LevelConfig {
    type Err = ConfigError;

    /// Parses the compact `sets:assoc:hit` form, e.g. `256:2:1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedLevel(s.to_string());
        let mut fields = s.trim().split(':');
        let mut next = || fields.next().map(str::trim).ok_or_else(malformed);

        let sets = next()?.parse::<u32>().map_err(|_| malformed())?;
        let ways = next()?.parse::<u32>().map_err(|_| malformed())?;
        let hit_time = next()?.parse::<u64>().map_err(|_| malformed())?;
        if fields.next().is_some() {
            return Err(malformed());
        }
        Ok(Self::new(sets, ways, hit_time))
    }
}

/// Root configuration structure for a simulation run.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use memsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.block_size, 64);
/// assert!(config.icache.is_enabled());
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use memsim_core::config::Config;
///
/// let json = r#"{
///     "icache": { "sets": 128, "ways": 2, "hit_time": 1 },
///     "dcache": { "sets": 0 },
///     "l2": { "sets": 1024, "ways": 8, "hit_time": 10 },
///     "inclusive": true,
///     "prefetch": true,
///     "block_size": 32,
///     "mem_speed": 120
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.icache.sets, 128);
/// assert!(!config.dcache.is_enabled());
/// assert_eq!(config.stream_buffer_entries, 4);
/// assert_eq!(config.mem_speed, 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// L1 instruction cache
    #[serde(default)]
    pub icache: LevelConfig,

    /// L1 data cache
    #[serde(default)]
    pub dcache: LevelConfig,

    /// Unified L2 cache
    #[serde(default = "LevelConfig::l2_default", deserialize_with = "deserialize_l2")]
    pub l2: LevelConfig,

    /// L2 holds a superset of L1 contents. Recorded for reporting only; no
    /// back-invalidation is modelled.
    #[serde(default)]
    pub inclusive: bool,

    /// Enable stream buffers and next-line prefetching
    #[serde(default)]
    pub prefetch: bool,

    /// Block (line) size in bytes, shared by all levels
    #[serde(default = "Config::default_block_size")]
    pub block_size: u32,

    /// Main memory latency in cycles
    #[serde(default = "Config::default_mem_speed")]
    pub mem_speed: u64,

    /// Stream buffer capacity per level, in blocks
    #[serde(default = "Config::default_stream_buffer_entries")]
    pub stream_buffer_entries: usize,

    /// Blocks installed per prefetch trigger
    #[serde(default = "Config::default_prefetch_degree")]
    pub prefetch_degree: usize,
}

impl Config {
    /// Returns the default block size in bytes.
    fn default_block_size() -> u32 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default main memory latency.
    fn default_mem_speed() -> u64 {
        defaults::MEM_SPEED
    }

    /// Returns the default stream buffer capacity.
    fn default_stream_buffer_entries() -> usize {
        defaults::STREAM_BUFFER_ENTRIES
    }

    /// Returns the default prefetch degree.
    fn default_prefetch_degree() -> usize {
        defaults::PREFETCH_DEGREE
    }

    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the configuration of one level.
    pub const fn level(&self, level: CacheLevel) -> &LevelConfig {
        match level {
            CacheLevel::ICache => &self.icache,
            CacheLevel::DCache => &self.dcache,
            CacheLevel::L2 => &self.l2,
        }
    }

    /// Checks every precondition the simulation engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: non-power-of-two set counts or
    /// block size, an enabled level with zero ways, or prefetching with an
    /// empty stream buffer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(self.block_size));
        }
        for level in CacheLevel::ALL {
            self.level(level).validate(level)?;
        }
        if self.prefetch && self.stream_buffer_entries == 0 {
            return Err(ConfigError::EmptyStreamBuffer);
        }
        Ok(())
    }
}

impl Default for Config {
    /// Creates a default configuration.
    ///
    /// Both L1 caches and the L2 are enabled, prefetching is off.
    fn default() -> Self {
        Self {
            icache: LevelConfig::default(),
            dcache: LevelConfig::default(),
            l2: LevelConfig::l2_default(),
            inclusive: false,
            prefetch: false,
            block_size: defaults::BLOCK_SIZE,
            mem_speed: defaults::MEM_SPEED,
            stream_buffer_entries: defaults::STREAM_BUFFER_ENTRIES,
            prefetch_degree: defaults::PREFETCH_DEGREE,
        }
    }
}

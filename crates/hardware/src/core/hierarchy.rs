//! Memory hierarchy access coordinator.
//!
//! Resolves one reference at a time through split L1 caches, a unified L2 and
//! main memory. For every enabled level the lookup order is:
//! 1. **Stream buffer:** Probed without insertion; a hit costs the level's hit time.
//! 2. **Main cache:** Probed with insert-on-miss and LRU promotion on hit.
//! 3. **Next level:** On a miss the reference recurses downward; the returned
//!    latency is charged as this level's penalty and the level's hit time is
//!    added on the way back up.
//!
//! A disabled level (zero sets) is a pure pass-through and touches no counters.
//! Main memory always answers in `mem_speed` cycles. With prefetching enabled
//! the L2 installs the next block into its own stream buffer after every
//! access it resolves, while the L1 stream buffers are filled only through
//! the explicit `icache_prefetch` / `dcache_prefetch` entry points.

use tracing::{debug, trace};

use crate::common::{AccessType, CacheLevel, ConfigError};
use crate::config::Config;
use crate::core::units::cache::{CacheSim, Lookup};
use crate::core::units::prefetch::{NextLinePrefetcher, Prefetcher};
use crate::stats::SimStats;

/// One hierarchy level: main cache, stream buffer, and its prefetcher.
#[derive(Debug)]
struct Level {
    kind: CacheLevel,
    hit_time: u64,
    cache: CacheSim,
    stream: CacheSim,
    prefetcher: Option<Box<dyn Prefetcher>>,
}

impl Level {
    fn new(kind: CacheLevel, config: &Config) -> Self {
        let level = config.level(kind);
        let prefetcher: Option<Box<dyn Prefetcher>> = if config.prefetch && level.is_enabled() {
            Some(Box::new(NextLinePrefetcher::new(
                config.block_size,
                config.prefetch_degree,
            )))
        } else {
            None
        };

        Self {
            kind,
            hit_time: level.hit_time,
            cache: CacheSim::from_level(level, config.block_size),
            stream: CacheSim::stream_buffer(config.stream_buffer_entries, config.block_size),
            prefetcher,
        }
    }

    fn is_enabled(&self) -> bool {
        self.cache.is_enabled()
    }

    /// Counts the reference and probes stream buffer then cache.
    ///
    /// Returns the hit time on a hit. On a miss the miss is counted and
    /// classified, and the caller resolves the next level.
    fn probe(&mut self, addr: u32, stats: &mut SimStats) -> Option<u64> {
        let counters = stats.level_mut(self.kind);
        counters.refs += 1;

        if self.prefetcher.is_some() && self.stream.access(addr, false).is_hit() {
            counters.stream_hits += 1;
            return Some(self.hit_time);
        }

        match self.cache.access(addr, true) {
            Lookup::Hit => Some(self.hit_time),
            Lookup::Miss(kind) => {
                counters.misses += 1;
                stats.record_miss(kind);
                trace!(level = %self.kind, addr, ?kind, "miss");
                None
            }
        }
    }

    /// Feeds `addr` to the prefetcher and installs its targets in the stream buffer.
    fn prefetch(&mut self, addr: u32, hit: bool, stats: &mut SimStats) {
        let Some(prefetcher) = self.prefetcher.as_mut() else {
            return;
        };
        for target in prefetcher.observe(addr, hit) {
            if self.stream.install(target) {
                stats.level_mut(self.kind).prefetches += 1;
                trace!(level = %self.kind, target, "prefetch");
            }
        }
    }
}

/// Split-L1, unified-L2 cache hierarchy with its statistics.
///
/// Construction is the one-time initialization: every structure is allocated
/// and every counter zeroed. Independent instances share nothing.
///
/// # Examples
///
/// ```
/// use memsim_core::config::{Config, LevelConfig};
/// use memsim_core::MemoryHierarchy;
///
/// let config = Config {
///     icache: LevelConfig::new(1, 2, 1),
///     l2: LevelConfig::disabled(),
///     block_size: 4,
///     mem_speed: 100,
///     ..Config::default()
/// };
/// let mut mem = MemoryHierarchy::new(&config).unwrap();
///
/// assert_eq!(mem.icache_access(0), 101);
/// assert_eq!(mem.icache_access(0), 1);
/// assert_eq!(mem.stats().icache.misses, 1);
/// ```
#[derive(Debug)]
pub struct MemoryHierarchy {
    config: Config,
    icache: Level,
    dcache: Level,
    l2: Level,
    stats: SimStats,
}

impl MemoryHierarchy {
    /// Builds the hierarchy described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration violates a geometry
    /// precondition (see [`Config::validate`]).
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            icache = ?config.icache,
            dcache = ?config.dcache,
            l2 = ?config.l2,
            block_size = config.block_size,
            mem_speed = config.mem_speed,
            prefetch = config.prefetch,
            inclusive = config.inclusive,
            "building memory hierarchy"
        );

        Ok(Self {
            config: config.clone(),
            icache: Level::new(CacheLevel::ICache, config),
            dcache: Level::new(CacheLevel::DCache, config),
            l2: Level::new(CacheLevel::L2, config),
            stats: SimStats::default(),
        })
    }

    /// Configuration this hierarchy was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Main cache of one level, for inspection.
    pub const fn cache(&self, level: CacheLevel) -> &CacheSim {
        &self.level(level).cache
    }

    /// Stream buffer of one level, for inspection.
    pub const fn stream_buffer(&self, level: CacheLevel) -> &CacheSim {
        &self.level(level).stream
    }

    const fn level(&self, level: CacheLevel) -> &Level {
        match level {
            CacheLevel::ICache => &self.icache,
            CacheLevel::DCache => &self.dcache,
            CacheLevel::L2 => &self.l2,
        }
    }

    const fn level_mut(&mut self, level: CacheLevel) -> &mut Level {
        match level {
            CacheLevel::ICache => &mut self.icache,
            CacheLevel::DCache => &mut self.dcache,
            CacheLevel::L2 => &mut self.l2,
        }
    }

    /// Performs an instruction fetch through the I$ and returns its latency.
    pub fn icache_access(&mut self, addr: u32) -> u64 {
        self.l1_access(CacheLevel::ICache, addr)
    }

    /// Performs a data reference through the D$ and returns its latency.
    pub fn dcache_access(&mut self, addr: u32) -> u64 {
        self.l1_access(CacheLevel::DCache, addr)
    }

    /// Routes a reference to the L1 matching `kind`.
    pub fn access(&mut self, kind: AccessType, addr: u32) -> u64 {
        self.l1_access(kind.into(), addr)
    }

    fn l1_access(&mut self, which: CacheLevel, addr: u32) -> u64 {
        if !self.level(which).is_enabled() {
            return self.l2cache_access(addr);
        }

        let level = match which {
            CacheLevel::ICache => &mut self.icache,
            CacheLevel::DCache => &mut self.dcache,
            CacheLevel::L2 => &mut self.l2,
        };
        if let Some(hit_time) = level.probe(addr, &mut self.stats) {
            return hit_time;
        }

        let downstream = self.l2cache_access(addr);
        self.stats.level_mut(which).penalties += downstream;
        downstream.saturating_add(self.level(which).hit_time)
    }

    /// Performs a reference at the L2 and returns its latency.
    ///
    /// L1 misses land here; drivers may also call it directly. Latencies
    /// saturate at `u64::MAX`.
    pub fn l2cache_access(&mut self, addr: u32) -> u64 {
        if !self.l2.is_enabled() {
            return self.config.mem_speed;
        }

        let hit = self.l2.probe(addr, &mut self.stats);
        let latency = hit.unwrap_or_else(|| {
            let mem_speed = self.config.mem_speed;
            self.stats.l2.penalties += mem_speed;
            mem_speed.saturating_add(self.l2.hit_time)
        });

        self.l2.prefetch(addr, hit.is_some(), &mut self.stats);
        latency
    }

    /// Installs the block after `addr` into the I$ stream buffer.
    ///
    /// Demand counters are not touched. Does nothing when prefetching is off
    /// or the I$ is disabled.
    pub fn icache_prefetch(&mut self, addr: u32) {
        self.l1_prefetch(CacheLevel::ICache, addr);
    }

    /// Installs the block after `addr` into the D$ stream buffer.
    ///
    /// Demand counters are not touched. Does nothing when prefetching is off
    /// or the D$ is disabled.
    pub fn dcache_prefetch(&mut self, addr: u32) {
        self.l1_prefetch(CacheLevel::DCache, addr);
    }

    /// Routes a prefetch hint to the L1 matching `kind`.
    pub fn prefetch(&mut self, kind: AccessType, addr: u32) {
        self.l1_prefetch(kind.into(), addr);
    }

    fn l1_prefetch(&mut self, which: CacheLevel, addr: u32) {
        let level = match which {
            CacheLevel::ICache => &mut self.icache,
            CacheLevel::DCache => &mut self.dcache,
            CacheLevel::L2 => &mut self.l2,
        };
        level.prefetch(addr, false, &mut self.stats);
    }

    /// Releases every resident line in every cache and stream buffer.
    ///
    /// Statistics are kept so they can still be reported.
    pub fn teardown(&mut self) {
        for kind in CacheLevel::ALL {
            let level = self.level_mut(kind);
            level.cache.flush();
            level.stream.flush();
        }
        debug!(stats = ?self.stats, "hierarchy torn down");
    }

    /// Returns the hierarchy to its freshly built state: no resident lines,
    /// all counters zero.
    pub fn reset(&mut self) {
        self.teardown();
        self.stats = SimStats::default();
    }
}

//! Simulation statistics collection.
//!
//! This module accumulates raw counters for the cache hierarchy. It provides:
//! 1. **Per-level counters:** References, misses, and penalty cycles for I$, D$, and L2$.
//! 2. **Stream buffer activity:** Stream-buffer hits and prefetch installs per level.
//! 3. **Miss classification:** Global compulsory and other miss totals.
//!
//! Counters are plain accumulators. Derived figures such as miss rate or average
//! access time belong to whoever reports them.

use serde::Serialize;

use crate::common::CacheLevel;
use crate::core::units::cache::MissKind;

/// Counters for one cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Demand references that reached this level.
    pub refs: u64,
    /// Demand references that missed both the stream buffer and the cache.
    pub misses: u64,
    /// Cycles spent below this level servicing its misses.
    pub penalties: u64,
    /// Demand references served by the level's stream buffer.
    pub stream_hits: u64,
    /// Blocks newly installed into the level's stream buffer.
    pub prefetches: u64,
}

/// Simulation statistics for the whole hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// L1 instruction cache counters.
    pub icache: CacheStats,
    /// L1 data cache counters.
    pub dcache: CacheStats,
    /// Unified L2 cache counters.
    pub l2: CacheStats,
    /// Misses that found their set empty, across all levels.
    pub compulsory_misses: u64,
    /// All remaining misses, across all levels.
    pub other_misses: u64,
}

impl SimStats {
    /// Returns the counters of one level.
    pub const fn level(&self, level: CacheLevel) -> &CacheStats {
        match level {
            CacheLevel::ICache => &self.icache,
            CacheLevel::DCache => &self.dcache,
            CacheLevel::L2 => &self.l2,
        }
    }

    pub(crate) const fn level_mut(&mut self, level: CacheLevel) -> &mut CacheStats {
        match level {
            CacheLevel::ICache => &mut self.icache,
            CacheLevel::DCache => &mut self.dcache,
            CacheLevel::L2 => &mut self.l2,
        }
    }

    pub(crate) const fn record_miss(&mut self, kind: MissKind) {
        match kind {
            MissKind::Compulsory => self.compulsory_misses += 1,
            MissKind::Other => self.other_misses += 1,
        }
    }
}

//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable set-associative cache with LRU
//! replacement. It tracks tags only (no data) and reports hit/miss outcomes so
//! the hierarchy can charge latency. The same component, built with a single
//! set, serves as a fully-associative stream buffer.

/// LRU-ordered cache set.
pub mod lru_set;

use tracing::trace;

pub use self::lru_set::{Lookup, LruSet, MissKind};
use crate::common::AddressDecoder;
use crate::config::LevelConfig;

/// Cache simulator implementing a set-associative cache with LRU replacement.
///
/// A cache with zero sets is disabled: it holds nothing and every probe
/// misses. Callers are expected to route around disabled caches instead of
/// probing them.
#[derive(Clone, Debug)]
pub struct CacheSim {
    sets: Vec<LruSet>,
    decoder: AddressDecoder,
    ways: u32,
    block_size: u32,
}

impl CacheSim {
    /// Creates a new cache with the specified geometry.
    ///
    /// # Arguments
    ///
    /// * `sets` - Number of sets (power of two, or zero to disable)
    /// * `ways` - Associativity
    /// * `block_size` - Block size in bytes (power of two)
    pub fn new(sets: u32, ways: u32, block_size: u32) -> Self {
        Self {
            sets: vec![LruSet::new(ways as usize); sets as usize],
            decoder: AddressDecoder::new(block_size, sets),
            ways,
            block_size,
        }
    }

    /// Creates a cache from a level configuration.
    pub fn from_level(level: &LevelConfig, block_size: u32) -> Self {
        Self::new(level.sets, level.ways, block_size)
    }

    /// Creates a fully-associative stream buffer holding `capacity` blocks.
    ///
    /// One set means zero index bits, so the tag is the full block address.
    pub fn stream_buffer(capacity: usize, block_size: u32) -> Self {
        Self::new(1, u32::try_from(capacity).unwrap_or(u32::MAX), block_size)
    }

    /// Whether the cache holds any sets.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.sets.is_empty()
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Associativity.
    pub const fn ways(&self) -> u32 {
        self.ways
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Address decoder for this geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Returns a set by index.
    pub fn set(&self, index: usize) -> Option<&LruSet> {
        self.sets.get(index)
    }

    /// Total resident lines across all sets.
    pub fn resident_lines(&self) -> usize {
        self.sets.iter().map(LruSet::len).sum()
    }

    /// Checks if the cache contains the specified address.
    ///
    /// Recency state is left untouched.
    pub fn contains(&self, addr: u32) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let (tag, index) = self.decoder.tag_and_index(addr);
        self.sets[index].contains(tag)
    }

    /// Accesses the cache for the specified address.
    ///
    /// Probes the target set, promoting the line on a hit. On a miss the line
    /// is installed only when `update` is set; stream buffers are probed with
    /// `update == false` so that only prefetches fill them.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to access
    /// * `update` - Install the block on a miss
    ///
    /// # Returns
    ///
    /// `Lookup::Hit`, or `Lookup::Miss` carrying the compulsory/other class.
    pub fn access(&mut self, addr: u32, update: bool) -> Lookup {
        if !self.is_enabled() {
            return Lookup::Miss(MissKind::Other);
        }

        let (tag, index) = self.decoder.tag_and_index(addr);
        let set = &mut self.sets[index];
        let result = set.lookup(tag);
        if update && !result.is_hit() {
            if let Some(victim) = set.insert(tag) {
                trace!(addr, index, tag, victim, "evict");
            }
        }
        result
    }

    /// Installs the block holding `addr`, promoting it if already resident.
    ///
    /// Returns `true` when the block was newly installed.
    pub fn install(&mut self, addr: u32) -> bool {
        !self.access(addr, true).is_hit()
    }

    /// Drops every resident line.
    pub fn flush(&mut self) {
        for set in &mut self.sets {
            set.clear();
        }
    }
}

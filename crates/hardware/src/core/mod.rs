//! Cache hierarchy core.
//!
//! This module contains the cache units (LRU sets, set-associative caches,
//! stream buffers, prefetchers) and the coordinator that resolves each
//! reference through them.

/// Access coordinator for the I$/D$/L2$/memory hierarchy.
pub mod hierarchy;

/// Cache and prefetch units.
pub mod units;

pub use self::hierarchy::MemoryHierarchy;

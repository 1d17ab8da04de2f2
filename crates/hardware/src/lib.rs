//! Cache hierarchy timing simulator library.
//!
//! This crate models the timing of a split-L1 / unified-L2 memory hierarchy
//! replayed one reference at a time:
//! 1. **Common:** Address decoding, access types, and configuration errors.
//! 2. **Config:** Per-level geometry, block size, memory latency, and prefetch settings.
//! 3. **Core:** LRU sets, set-associative caches, stream buffers, prefetchers, and
//!    the hierarchy coordinator that charges latency level by level.
//! 4. **Stats:** Per-level reference/miss/penalty counters and miss classification.

/// Common types (address decoding, access types, errors).
pub mod common;
/// Simulator configuration (defaults, level geometry, validation).
pub mod config;
/// Hierarchy coordinator and cache units.
pub mod core;
/// Simulation statistics collection.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Cache hierarchy; construct with `MemoryHierarchy::new`.
pub use crate::core::MemoryHierarchy;
/// Accumulated counters for a simulation run.
pub use crate::stats::SimStats;

//! Cache units.
//!
//! Building blocks for one hierarchy level: the set-associative cache (also
//! used, with a single set, as a stream buffer) and the prefetchers that fill
//! stream buffers.

/// Set-associative cache with LRU replacement.
pub mod cache;

/// Hardware prefetcher implementations.
pub mod prefetch;

//! Hardware Prefetcher implementations.
//!
//! This module contains the interface and implementations for the prefetchers
//! that feed each level's stream buffer.

/// Next-line prefetcher (prefetches sequential blocks).
pub mod next_line;

pub use self::next_line::NextLinePrefetcher;

/// Trait for prefetcher implementations.
///
/// Prefetchers observe memory references and generate prefetch requests
/// to hide miss latency.
pub trait Prefetcher: Send + Sync + std::fmt::Debug {
    /// Observes a memory reference and generates prefetch addresses.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address that was referenced
    /// * `hit` - Whether the reference hit at the observing level
    ///
    /// # Returns
    ///
    /// A vector of addresses to prefetch. Empty if no prefetches are needed.
    fn observe(&mut self, addr: u32, hit: bool) -> Vec<u32>;
}

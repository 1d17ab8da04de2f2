//! Next-Line Prefetcher.
//!
//! A simple spatial prefetcher that requests the block(s) following every
//! reference it observes. This exploits the spatial locality of instruction
//! streams and sequential data arrays.

use super::Prefetcher;

/// Next-Line Prefetcher state.
#[derive(Clone, Debug)]
pub struct NextLinePrefetcher {
    /// Block size in bytes.
    block_size: u32,
    /// Number of subsequent blocks to prefetch (prefetch degree).
    degree: usize,
}

impl NextLinePrefetcher {
    /// Creates a new Next-Line prefetcher.
    ///
    /// # Arguments
    ///
    /// * `block_size` - The block size in bytes.
    /// * `degree` - The number of blocks to prefetch ahead. Zero is treated as one.
    pub fn new(block_size: u32, degree: usize) -> Self {
        Self {
            block_size,
            degree: degree.max(1),
        }
    }

    /// Number of blocks requested per observation.
    pub const fn degree(&self) -> usize {
        self.degree
    }
}

impl Prefetcher for NextLinePrefetcher {
    /// Returns `addr + k * block_size` for `k` in `1..=degree`.
    ///
    /// Addresses wrap at the top of the 32-bit space.
    fn observe(&mut self, addr: u32, _hit: bool) -> Vec<u32> {
        let mut target = addr;
        (0..self.degree)
            .map(|_| {
                target = target.wrapping_add(self.block_size);
                target
            })
            .collect()
    }
}

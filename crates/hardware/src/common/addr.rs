//! Address decomposition.
//!
//! Splits a 32-bit memory reference into the three fields a set-associative
//! structure cares about:
//! 1. **Offset:** Byte position inside a block (`log2(block_size)` low bits).
//! 2. **Index:** Set selector (`log2(sets)` bits above the offset).
//! 3. **Tag:** Everything above the index, stored in the line for matching.
//!
//! Block size and set count are assumed to be powers of two; the configuration
//! layer rejects anything else before a decoder is built.

/// Fields extracted from a single address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// Tag bits stored in the cache line.
    pub tag: u32,
    /// Set index the address maps to.
    pub index: usize,
    /// Byte offset within the block.
    pub offset: u32,
}

/// Precomputed shift/mask state for one cache geometry.
///
/// Built once per structure; decoding is then two shifts and two masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
    index_mask: u32,
}

/// Floor of `log2(n)`, with `log2(0)` treated as zero.
#[inline(always)]
pub fn log2(n: u32) -> u32 {
    n.checked_ilog2().unwrap_or(0)
}

impl AddressDecoder {
    /// Creates a decoder for the given block size and set count.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Block size in bytes (power of two).
    /// * `sets` - Number of sets (power of two). A stream buffer uses 1, which
    ///   yields zero index bits so the whole block address becomes the tag.
    pub fn new(block_size: u32, sets: u32) -> Self {
        Self {
            offset_bits: log2(block_size),
            index_bits: log2(sets),
            index_mask: sets.saturating_sub(1),
        }
    }

    /// Number of block-offset bits.
    #[inline(always)]
    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of set-index bits.
    #[inline(always)]
    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Mask applied to the block address to select the set.
    #[inline(always)]
    pub fn index_mask(&self) -> u32 {
        self.index_mask
    }

    /// Splits `addr` into tag, set index and block offset.
    ///
    /// Shifts that would consume the whole word produce zero instead of
    /// overflowing, so a geometry covering all 32 address bits maps every
    /// address to tag 0.
    #[inline(always)]
    pub fn decode(&self, addr: u32) -> DecodedAddr {
        let block = addr.checked_shr(self.offset_bits).unwrap_or(0);
        let tag = addr
            .checked_shr(self.offset_bits + self.index_bits)
            .unwrap_or(0);
        DecodedAddr {
            tag,
            index: (block & self.index_mask) as usize,
            offset: addr & self.offset_mask(),
        }
    }

    /// Returns `(tag, index)` for `addr`.
    #[inline(always)]
    pub fn tag_and_index(&self, addr: u32) -> (u32, usize) {
        let d = self.decode(addr);
        (d.tag, d.index)
    }

    fn offset_mask(&self) -> u32 {
        1u32.checked_shl(self.offset_bits)
            .map_or(u32::MAX, |b| b.wrapping_sub(1))
    }
}

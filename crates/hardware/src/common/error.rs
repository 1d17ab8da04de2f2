//! Configuration error definitions.
//!
//! The access path has no recoverable failures: disabled levels, full sets and
//! stream-buffer misses are ordinary control flow. Every precondition the
//! engine relies on (power-of-two geometry, non-empty sets) is checked once
//! when a hierarchy is built, and reported through [`ConfigError`].

use thiserror::Error;

use super::data::CacheLevel;

/// Reasons a configuration is rejected before simulation starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Set count is neither zero (disabled) nor a power of two.
    #[error("{level} sets must be zero or a power of two, got {sets}")]
    SetsNotPowerOfTwo {
        /// Level whose geometry is invalid.
        level: CacheLevel,
        /// Offending set count.
        sets: u32,
    },

    /// An enabled level has no ways to hold lines.
    #[error("{level} is enabled but has zero associativity")]
    ZeroWays {
        /// Level whose geometry is invalid.
        level: CacheLevel,
    },

    /// Block size is zero or not a power of two.
    #[error("block size must be a non-zero power of two, got {0}")]
    BlockSizeNotPowerOfTwo(u32),

    /// Prefetching was requested with no stream-buffer capacity.
    #[error("prefetching is enabled but the stream buffer has zero entries")]
    EmptyStreamBuffer,

    /// A `sets:assoc:hit` level descriptor could not be parsed.
    #[error("malformed level descriptor `{0}`, expected sets:assoc:hit")]
    MalformedLevel(String),
}

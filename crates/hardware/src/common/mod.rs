//! Common utilities and types used throughout the cache hierarchy simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Address Decoding:** Tag/index/offset extraction for a cache geometry.
//! 2. **Access Types:** Reference kinds and hierarchy level names.
//! 3. **Error Handling:** Configuration errors raised before simulation starts.

/// Address decomposition (tag, set index, block offset).
pub mod addr;

/// Memory access type and hierarchy level definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddr};
pub use data::{AccessType, CacheLevel};
pub use error::ConfigError;

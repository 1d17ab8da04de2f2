//! Memory Access Types.
//!
//! This module defines the classification of memory references used throughout
//! the simulator:
//! 1. **Routing:** Selecting the L1 structure (I$ or D$) a reference enters.
//! 2. **Reporting:** Naming hierarchy levels in logs, errors, and statistics.

use std::fmt;

/// Type of memory reference issued by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch, routed through the L1 instruction cache.
    Fetch,

    /// Data load or store, routed through the L1 data cache.
    ///
    /// The timing model does not distinguish reads from writes.
    Data,
}

/// One level of the modelled hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheLevel {
    /// L1 instruction cache.
    ICache,
    /// L1 data cache.
    DCache,
    /// Unified L2 cache.
    L2,
}

impl CacheLevel {
    /// All levels, L1 first.
    pub const ALL: [Self; 3] = [Self::ICache, Self::DCache, Self::L2];

    /// Short report label (`I$`, `D$`, `L2$`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::ICache => "I$",
            Self::DCache => "D$",
            Self::L2 => "L2$",
        }
    }
}

impl From<AccessType> for CacheLevel {
    fn from(kind: AccessType) -> Self {
        match kind {
            AccessType::Fetch => Self::ICache,
            AccessType::Data => Self::DCache,
        }
    }
}

impl fmt::Display for CacheLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Cache Simulator (CacheSim) Unit Tests.
//!
//! Verifies the set-associative cache on its own: hit/miss logic, LRU
//! eviction within a set, isolation between sets, probe-only access, the
//! disabled (zero-set) cache, and the single-set stream buffer geometry.

use memsim_core::config::LevelConfig;
use memsim_core::core::units::cache::{CacheSim, Lookup, LruSet, MissKind};
use rstest::rstest;

use crate::common::same_set_addrs;

// ══════════════════════════════════════════════════════════
// 1. Basic hit / miss
// ══════════════════════════════════════════════════════════

/// sets=1, ways=2, block=4: the reference walk-through.
#[test]
fn two_way_single_set_walkthrough() {
    let mut cache = CacheSim::new(1, 2, 4);

    assert_eq!(cache.access(0, true), Lookup::Miss(MissKind::Compulsory));
    assert_eq!(cache.access(0, true), Lookup::Hit);
    assert_eq!(cache.access(4, true), Lookup::Miss(MissKind::Other));
    assert_eq!(cache.access(8, true), Lookup::Miss(MissKind::Other));
    assert!(!cache.contains(0), "block 0 was LRU and must be evicted");
    assert_eq!(cache.access(0, true), Lookup::Miss(MissKind::Other));
}

#[test]
fn same_block_different_offset_hits() {
    let mut cache = CacheSim::new(4, 2, 64);
    let _ = cache.access(0x1000, true);
    assert!(cache.access(0x1000 + 32, true).is_hit());
}

#[test]
fn from_level_matches_geometry() {
    let cache = CacheSim::from_level(&LevelConfig::new(128, 4, 1), 32);
    assert!(cache.is_enabled());
    assert_eq!(cache.num_sets(), 128);
    assert_eq!(cache.ways(), 4);
    assert_eq!(cache.block_size(), 32);
    assert_eq!(cache.decoder().index_bits(), 7);
}

// ══════════════════════════════════════════════════════════
// 2. Set conflicts
// ══════════════════════════════════════════════════════════

/// Touching ways + 1 blocks of one set evicts the first.
#[rstest]
#[case(1, 1)]
#[case(1, 4)]
#[case(4, 2)]
#[case(16, 8)]
#[case(256, 1)]
fn over_capacity_evicts_first_block(#[case] sets: u32, #[case] ways: u32) {
    let mut cache = CacheSim::new(sets, ways, 64);
    let addrs = same_set_addrs(sets, 64, sets - 1, ways as usize + 1);

    for &addr in &addrs {
        assert!(!cache.access(addr, true).is_hit());
    }
    assert!(!cache.access(addrs[0], true).is_hit());
}

/// Filling one set leaves other sets untouched.
#[test]
fn sets_are_isolated() {
    let mut cache = CacheSim::new(4, 1, 64);
    let _ = cache.access(0, true);
    for addr in same_set_addrs(4, 64, 1, 8) {
        let _ = cache.access(addr, true);
    }
    assert!(cache.access(0, true).is_hit());
    assert_eq!(cache.set(1).map(LruSet::len), Some(1));
}

/// Probing without update leaves the cache unchanged.
#[test]
fn probe_without_update_does_not_install() {
    let mut cache = CacheSim::new(2, 2, 16);
    assert!(!cache.access(0x20, false).is_hit());
    assert!(!cache.contains(0x20));
    assert_eq!(cache.resident_lines(), 0);
}

#[test]
fn install_reports_new_blocks_only() {
    let mut cache = CacheSim::new(2, 2, 16);
    assert!(cache.install(0x40));
    assert!(!cache.install(0x44));
    assert_eq!(cache.resident_lines(), 1);
}

#[test]
fn flush_empties_every_set() {
    let mut cache = CacheSim::new(8, 2, 16);
    for addr in (0..64).map(|k| k * 16) {
        let _ = cache.access(addr, true);
    }
    assert_eq!(cache.resident_lines(), 16);
    cache.flush();
    assert_eq!(cache.resident_lines(), 0);
    assert_eq!(cache.access(0, true), Lookup::Miss(MissKind::Compulsory));
}

// ══════════════════════════════════════════════════════════
// 3. Disabled cache
// ══════════════════════════════════════════════════════════

#[test]
fn zero_sets_is_disabled() {
    let mut cache = CacheSim::from_level(&LevelConfig::disabled(), 64);
    assert!(!cache.is_enabled());
    assert!(!cache.access(0, true).is_hit());
    assert!(!cache.contains(0));
    assert_eq!(cache.resident_lines(), 0);
}

// ══════════════════════════════════════════════════════════
// 4. Stream buffer geometry
// ══════════════════════════════════════════════════════════

#[test]
fn stream_buffer_is_single_set() {
    let sb = CacheSim::stream_buffer(4, 64);
    assert_eq!(sb.num_sets(), 1);
    assert_eq!(sb.ways(), 4);
    assert_eq!(sb.decoder().index_bits(), 0);
}

/// Any `capacity` distinct blocks fit; one more evicts the oldest.
#[test]
fn stream_buffer_is_fully_associative() {
    let mut sb = CacheSim::stream_buffer(4, 64);
    let blocks = [0x0000, 0x1000, 0x2040, 0xFFC0];
    for b in blocks {
        assert!(sb.install(b));
    }
    for b in blocks {
        assert!(sb.contains(b));
    }

    assert!(sb.install(0x8000));
    assert!(!sb.contains(0x0000));
    assert!(sb.contains(0x1000));
}

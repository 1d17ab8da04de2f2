//! Next-Line Prefetcher Tests.
//!
//! Verifies that the next-line prefetcher emits `degree` sequential block
//! addresses following every observed reference.

use memsim_core::core::units::prefetch::{NextLinePrefetcher, Prefetcher};

/// Degree-1 prefetcher emits exactly one address, one block ahead.
#[test]
fn degree_1_emits_next_block() {
    let mut pf = NextLinePrefetcher::new(64, 1);
    assert_eq!(pf.observe(0x1000, false), vec![0x1040]);
}

/// Degree-4 prefetcher emits four sequential blocks.
#[test]
fn degree_4_emits_four_blocks() {
    let mut pf = NextLinePrefetcher::new(64, 4);
    let addrs = pf.observe(0x2000, true);
    assert_eq!(addrs.len(), 4);
    for (k, addr) in addrs.iter().enumerate() {
        assert_eq!(*addr, 0x2000 + 64 * (k as u32 + 1));
    }
}

/// A mid-block reference still targets the following block.
#[test]
fn mid_block_reference_targets_following_block() {
    let mut pf = NextLinePrefetcher::new(64, 1);
    let target = pf.observe(0x1020, false)[0];
    assert_eq!(target / 64, 0x1040 / 64);
}

#[test]
fn zero_degree_treated_as_one() {
    let pf = NextLinePrefetcher::new(16, 0);
    assert_eq!(pf.degree(), 1);
}

/// Hit status does not change the request.
#[test]
fn hit_and_miss_emit_same_targets() {
    let mut pf = NextLinePrefetcher::new(32, 2);
    assert_eq!(pf.observe(0x100, true), pf.observe(0x100, false));
}

#[test]
fn wraps_at_top_of_address_space() {
    let mut pf = NextLinePrefetcher::new(64, 2);
    assert_eq!(pf.observe(0xFFFF_FFC0, false), vec![0x0000_0000, 0x0000_0040]);
}

//! Trace file reader.
//!
//! A trace is plain text with one reference per line:
//!
//! ```text
//! # kind  address
//! I       0x00400000
//! D       7fff1230
//! IP      0x00400040
//! ```
//!
//! Kinds are `I` (instruction fetch), `D` (data reference), `IP` and `DP`
//! (prefetch hints for the I$ and D$ stream buffers). Addresses are 32-bit
//! hexadecimal with an optional `0x` prefix. Blank lines and `#` comments are
//! skipped.

use std::io::BufRead;

use memsim_core::MemoryHierarchy;
use memsim_core::common::AccessType;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// What a trace line asks the hierarchy to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    /// Demand reference.
    Access(AccessType),
    /// Next-line prefetch hint.
    Prefetch(AccessType),
}

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub op: TraceOp,
    pub addr: u32,
}

/// Errors raised while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("line {line}: unknown reference kind `{kind}`")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: missing address")]
    MissingAddress { line: usize },

    #[error("line {line}: invalid address `{text}`")]
    BadAddress { line: usize, text: String },

    #[error("line {line}: unexpected field `{text}`")]
    TrailingField { line: usize, text: String },

    #[error("failed to read trace")]
    Io(#[from] std::io::Error),
}

/// Totals gathered while replaying a trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    /// Instruction fetches replayed.
    pub fetches: u64,
    /// Data references replayed.
    pub data_refs: u64,
    /// Prefetch hints forwarded.
    pub prefetch_hints: u64,
    /// Cycles returned for instruction fetches.
    pub fetch_cycles: u64,
    /// Cycles returned for data references.
    pub data_cycles: u64,
}

impl TraceSummary {
    /// Cycles spent on all demand references.
    pub const fn total_cycles(&self) -> u64 {
        self.fetch_cycles + self.data_cycles
    }
}

fn parse_kind(kind: &str) -> Option<TraceOp> {
    match kind.to_ascii_uppercase().as_str() {
        "I" => Some(TraceOp::Access(AccessType::Fetch)),
        "D" => Some(TraceOp::Access(AccessType::Data)),
        "IP" => Some(TraceOp::Prefetch(AccessType::Fetch)),
        "DP" => Some(TraceOp::Prefetch(AccessType::Data)),
        _ => None,
    }
}

fn parse_addr(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    // from_str_radix accepts a leading sign.
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Parses one line. Returns `Ok(None)` for blank and comment-only lines.
///
/// `line` is the 1-based line number used in error messages.
pub fn parse_line(text: &str, line: usize) -> Result<Option<TraceRecord>, TraceError> {
    let body = text.split('#').next().unwrap_or_default();
    let mut fields = body.split_whitespace();
    let Some(kind) = fields.next() else {
        return Ok(None);
    };

    let op = parse_kind(kind).ok_or_else(|| TraceError::UnknownKind {
        line,
        kind: kind.to_string(),
    })?;
    let addr_text = fields.next().ok_or(TraceError::MissingAddress { line })?;
    let addr = parse_addr(addr_text).ok_or_else(|| TraceError::BadAddress {
        line,
        text: addr_text.to_string(),
    })?;
    if let Some(extra) = fields.next() {
        return Err(TraceError::TrailingField {
            line,
            text: extra.to_string(),
        });
    }

    Ok(Some(TraceRecord { op, addr }))
}

/// Applies one record to the hierarchy.
pub fn apply(record: TraceRecord, mem: &mut MemoryHierarchy, summary: &mut TraceSummary) {
    match record.op {
        TraceOp::Access(AccessType::Fetch) => {
            summary.fetches += 1;
            summary.fetch_cycles += mem.icache_access(record.addr);
        }
        TraceOp::Access(AccessType::Data) => {
            summary.data_refs += 1;
            summary.data_cycles += mem.dcache_access(record.addr);
        }
        TraceOp::Prefetch(kind) => {
            summary.prefetch_hints += 1;
            mem.prefetch(kind, record.addr);
        }
    }
}

/// Replays every reference in `reader` through `mem`, one at a time.
///
/// Stops at the first malformed line.
pub fn replay<R: BufRead>(reader: R, mem: &mut MemoryHierarchy) -> Result<TraceSummary, TraceError> {
    let mut summary = TraceSummary::default();
    for (idx, text) in reader.lines().enumerate() {
        let text = text?;
        if let Some(record) = parse_line(&text, idx + 1)? {
            apply(record, mem, &mut summary);
        }
    }
    debug!(?summary, "trace replayed");
    Ok(summary)
}

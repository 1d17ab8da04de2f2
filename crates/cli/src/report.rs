//! Simulation report.
//!
//! Turns the raw counters collected by the hierarchy into the figures an
//! architecture study wants: miss rate and average access time per level,
//! plus the miss classification and per-stream cycle totals.

use std::io::{self, Write};

use memsim_core::common::CacheLevel;
use memsim_core::config::Config;
use memsim_core::stats::{CacheStats, SimStats};
use serde::Serialize;

use crate::trace::TraceSummary;

/// Derived figures for one level.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelReport {
    pub level: &'static str,
    pub enabled: bool,
    pub refs: u64,
    pub misses: u64,
    pub miss_rate: f64,
    pub penalties: u64,
    pub avg_access_time: f64,
    pub stream_hits: u64,
    pub prefetches: u64,
}

impl LevelReport {
    /// Average access time is `hit_time + penalties / refs`; an unreferenced
    /// level reports zero for both rates.
    pub fn new(level: CacheLevel, config: &Config, stats: &CacheStats) -> Self {
        let geometry = config.level(level);
        let (miss_rate, avg_access_time) = if stats.refs == 0 {
            (0.0, 0.0)
        } else {
            let refs = stats.refs as f64;
            (
                stats.misses as f64 / refs,
                geometry.hit_time as f64 + stats.penalties as f64 / refs,
            )
        };

        Self {
            level: level.label(),
            enabled: geometry.is_enabled(),
            refs: stats.refs,
            misses: stats.misses,
            miss_rate,
            penalties: stats.penalties,
            avg_access_time,
            stream_hits: stats.stream_hits,
            prefetches: stats.prefetches,
        }
    }
}

/// Everything printed at the end of a run, also used for `--json`.
#[derive(Clone, Debug, Serialize)]
pub struct Report<'a> {
    pub config: &'a Config,
    pub trace: TraceSummary,
    pub levels: Vec<LevelReport>,
    pub compulsory_misses: u64,
    pub other_misses: u64,
    pub stats: &'a SimStats,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a Config, stats: &'a SimStats, trace: TraceSummary) -> Self {
        Self {
            config,
            trace,
            levels: CacheLevel::ALL
                .into_iter()
                .map(|level| LevelReport::new(level, config, stats.level(level)))
                .collect(),
            compulsory_misses: stats.compulsory_misses,
            other_misses: stats.other_misses,
            stats,
        }
    }

    /// Writes the human-readable report.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let c = self.config;
        let geometry = |level: CacheLevel| {
            let l = c.level(level);
            if l.is_enabled() {
                format!(
                    "{} sets x {} ways, {} B, hit {} cyc",
                    l.sets,
                    l.ways,
                    l.size_bytes(c.block_size),
                    l.hit_time
                )
            } else {
                "disabled".to_string()
            }
        };

        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE HIERARCHY SIMULATION")?;
        writeln!(out, "==========================================================")?;
        for level in CacheLevel::ALL {
            writeln!(out, "{:<8} {}", level.label(), geometry(level))?;
        }
        writeln!(out, "block    {} B", c.block_size)?;
        writeln!(out, "memory   {} cyc", c.mem_speed)?;
        writeln!(out, "inclusive {}", c.inclusive)?;
        writeln!(
            out,
            "prefetch {} (stream buffer {} entries, degree {})",
            c.prefetch, c.stream_buffer_entries, c.prefetch_degree
        )?;
        writeln!(out, "----------------------------------------------------------")?;

        for l in self.levels.iter().filter(|l| l.enabled) {
            writeln!(out, "{}", l.level)?;
            writeln!(out, "  refs                   {}", l.refs)?;
            writeln!(out, "  misses                 {}", l.misses)?;
            writeln!(out, "  miss_rate              {:.2}%", l.miss_rate * 100.0)?;
            writeln!(out, "  penalties              {}", l.penalties)?;
            writeln!(out, "  avg_access_time        {:.2} cyc", l.avg_access_time)?;
            if c.prefetch {
                writeln!(out, "  stream_hits            {}", l.stream_hits)?;
                writeln!(out, "  prefetches             {}", l.prefetches)?;
            }
        }
        writeln!(out, "----------------------------------------------------------")?;

        let t = &self.trace;
        writeln!(out, "fetches                  {}", t.fetches)?;
        writeln!(out, "fetch_cycles             {}", t.fetch_cycles)?;
        writeln!(out, "data_refs                {}", t.data_refs)?;
        writeln!(out, "data_cycles              {}", t.data_cycles)?;
        writeln!(out, "prefetch_hints           {}", t.prefetch_hints)?;
        writeln!(out, "total_cycles             {}", t.total_cycles())?;
        writeln!(out, "compulsory_misses        {}", self.compulsory_misses)?;
        writeln!(out, "other_misses             {}", self.other_misses)?;
        writeln!(out, "==========================================================")?;
        Ok(())
    }
}

//! Cache hierarchy simulator CLI.
//!
//! Replays a memory-reference trace through a split-L1 / unified-L2 hierarchy
//! and prints per-level statistics. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then command-line overrides.
//! 2. **Replay:** One reference at a time from a trace file or stdin.
//! 3. **Reporting:** Miss rates and average access times as text or JSON.

mod error;
mod report;
mod trace;

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use memsim_core::MemoryHierarchy;
use memsim_core::config::{Config, LevelConfig};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::report::Report;

#[derive(Parser, Debug)]
#[command(
    name = "memsim",
    author,
    version,
    about = "Trace-driven cache hierarchy timing simulator",
    long_about = "Replay a memory-reference trace through I$/D$, a unified L2$ and main memory.\n\nTrace lines are `<I|D|IP|DP> <hex address>`; the trace is read from stdin when no file is given.\n\nExamples:\n  memsim --icache 128:2:1 --dcache 64:4:1 --l2cache 1024:8:10 trace.txt\n  memsim --config hierarchy.json --prefetch --json trace.txt\n  zcat trace.gz | memsim --l2cache 0:0:0"
)]
struct Cli {
    /// Trace file (`-` or omitted reads stdin).
    trace: Option<PathBuf>,

    /// JSON configuration file; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// I$ geometry as sets:assoc:hit (0 sets disables the level).
    #[arg(long, value_name = "S:A:H")]
    icache: Option<LevelConfig>,

    /// D$ geometry as sets:assoc:hit.
    #[arg(long, value_name = "S:A:H")]
    dcache: Option<LevelConfig>,

    /// L2$ geometry as sets:assoc:hit.
    #[arg(long, value_name = "S:A:H")]
    l2cache: Option<LevelConfig>,

    /// Block size in bytes.
    #[arg(long)]
    blocksize: Option<u32>,

    /// Main memory latency in cycles.
    #[arg(long)]
    memspeed: Option<u64>,

    /// Mark the L2 as inclusive (reported, not enforced).
    #[arg(long)]
    inclusive: bool,

    /// Enable stream buffers and next-line prefetching.
    #[arg(long)]
    prefetch: bool,

    /// Stream buffer capacity in blocks.
    #[arg(long, value_name = "N")]
    stream_buffer: Option<usize>,

    /// Blocks installed per prefetch trigger.
    #[arg(long, value_name = "N")]
    prefetch_degree: Option<usize>,

    /// Emit the report as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn build_config(&self) -> Result<Config, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| CliError::Open {
                    path: path.clone(),
                    source,
                })?;
                Config::from_json(&text).map_err(|source| CliError::ConfigJson {
                    path: path.clone(),
                    source,
                })?
            }
            None => Config::default(),
        };

        if let Some(l) = self.icache {
            config.icache = l;
        }
        if let Some(l) = self.dcache {
            config.dcache = l;
        }
        if let Some(l) = self.l2cache {
            config.l2 = l;
        }
        if let Some(b) = self.blocksize {
            config.block_size = b;
        }
        if let Some(m) = self.memspeed {
            config.mem_speed = m;
        }
        if let Some(n) = self.stream_buffer {
            config.stream_buffer_entries = n;
        }
        if let Some(d) = self.prefetch_degree {
            config.prefetch_degree = d;
        }
        config.inclusive |= self.inclusive;
        config.prefetch |= self.prefetch;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.build_config()?;
    let mut mem = MemoryHierarchy::new(&config)?;

    let summary = match cli.trace.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            trace::replay(BufReader::new(file), &mut mem)?
        }
        _ => trace::replay(io::stdin().lock(), &mut mem)?,
    };
    mem.teardown();

    let report = Report::new(&config, mem.stats(), summary);
    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report.write_text(&mut out)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("memsim: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Driver-level errors.

use std::path::PathBuf;

use memsim_core::common::ConfigError;
use thiserror::Error;

use crate::trace::TraceError;

/// Anything that stops a run before a report is printed.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON config {path}: {source}")]
    ConfigJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

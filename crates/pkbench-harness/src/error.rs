//! Error types for harness runs.

use crate::execution_mode::ExecutionMode;
use crate::executor::BoxError;
use crate::report::BenchReport;
use pkbench_generator::{ConfigError, KeyGenError, Mode};
use thiserror::Error;

/// Errors that abort (or follow) a harness run.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Unknown mode, execution mode or row count; raised before any executor call.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Request body could not be decoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// Key derivation failed for a row; no statement was produced for it.
    #[error("Key generation failed at row {row} (mode {mode}): {source}")]
    KeyGeneration {
        row: u64,
        mode: Mode,
        #[source]
        source: KeyGenError,
    },

    /// Executor rejected a single-row transaction.
    #[error("Executor failed at row {row} (mode {mode}, {execution_mode}): {source}")]
    ExecuteRow {
        row: u64,
        mode: Mode,
        execution_mode: ExecutionMode,
        #[source]
        source: BoxError,
    },

    /// Executor rejected the batched transaction.
    #[error("Executor failed on batch of {rows} rows (mode {mode}, {execution_mode}): {source}")]
    ExecuteBatch {
        rows: u64,
        mode: Mode,
        execution_mode: ExecutionMode,
        #[source]
        source: BoxError,
    },

    /// Post-run delete-all failed. The finished measurement is kept.
    #[error("Cleanup failed after run {}: {source}", .report.run_id)]
    Cleanup {
        report: Box<BenchReport>,
        #[source]
        source: BoxError,
    },
}

impl HarnessError {
    /// The timing report, for errors raised after the measurement finished.
    pub fn report(&self) -> Option<&BenchReport> {
        match self {
            HarnessError::Cleanup { report, .. } => Some(report),
            _ => None,
        }
    }
}

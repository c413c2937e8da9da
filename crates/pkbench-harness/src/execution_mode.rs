//! Execution mode selection.

use pkbench_generator::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the harness submits statements to the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One transaction per row; the whole loop is timed.
    Single,
    /// All rows in one batched transaction; only the execute call is timed,
    /// statement construction is measured separately.
    Batch,
    /// All rows in one batched transaction; only the execute call is timed.
    BatchOnly,
}

impl ExecutionMode {
    /// All execution modes.
    pub const ALL: [ExecutionMode; 3] = [
        ExecutionMode::Single,
        ExecutionMode::Batch,
        ExecutionMode::BatchOnly,
    ];

    /// Wire name, as accepted by `--testmode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Single => "single",
            ExecutionMode::Batch => "batch",
            ExecutionMode::BatchOnly => "batch_only",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ExecutionMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownExecutionMode(s.to_string()))
    }
}

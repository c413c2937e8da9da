//! Error types for key generation and mode selection.

use thiserror::Error;

/// Errors raised while deriving the key for one row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyGenError {
    /// Snowflake node id outside the generator's valid range.
    #[error("Snowflake node id {node_id} is out of range (0..={max})")]
    InvalidNodeId { node_id: i64, max: i64 },

    /// The sequence counter was read before the harness set it for a row.
    #[error("Sequence counter read before it was set for the current row")]
    CounterUnset,

    /// The sequence counter would move backwards or repeat.
    #[error("Sequence counter cannot move from {current} to {requested}")]
    CounterRegression { current: i64, requested: i64 },

    /// The clock reported a time before the Snowflake epoch.
    #[error("Clock reading {now_millis}ms is before the Snowflake epoch")]
    ClockBeforeEpoch { now_millis: i64 },
}

/// Errors raised while selecting a strategy or execution mode by name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Name is not a known key-generation mode.
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// Mode name is recognised but has no key strategy.
    #[error("Mode '{0}' has no key strategy")]
    UnsupportedMode(String),

    /// Name is not a known execution mode.
    #[error("Unknown execution mode: {0}")]
    UnknownExecutionMode(String),

    /// Row count is negative.
    #[error("Invalid row count: {0}")]
    InvalidRowCount(i64),
}

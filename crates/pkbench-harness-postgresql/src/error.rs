//! Error types for the PostgreSQL executor.

use thiserror::Error;

/// Errors that can occur while connecting to or configuring the executor.
#[derive(Error, Debug)]
pub enum PostgreSQLExecutorError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Cloud Spanner executor over the PostgreSQL wire protocol.
//!
//! Spanner's PostgreSQL interface is reached through PGAdapter, so the
//! executor is a plain `tokio-postgres` client. Statements must be built in
//! [`pkbench_generator::SqlDialect::PostgreSql`], which the executor reports
//! through [`pkbench_harness::TransactionalExecutor::dialect`].

pub mod args;
pub mod error;
pub mod executor;

pub use args::SpannerTargetArgs;
pub use error::PostgreSQLExecutorError;
pub use executor::PostgreSQLExecutor;

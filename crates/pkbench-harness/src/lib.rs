//! Benchmark harness for primary-key generation strategies.
//!
//! The harness drives `num` row generations through a
//! [`pkbench_generator::StatementBuilder`] under one [`ExecutionMode`],
//! hands the statements to a [`TransactionalExecutor`] and measures the
//! elapsed wall time around the window that mode defines:
//!
//! | Execution mode | Statements built | Timing window |
//! |---|---|---|
//! | `single` | one per executor call, inside the loop | whole build + execute loop |
//! | `batch` | all up front | batched execute call (construction measured separately) |
//! | `batch_only` | all up front | batched execute call |
//!
//! An optional delete-all cleanup runs after the window closes.
//!
//! This crate contains no database client. `pkbench-harness-postgresql`
//! provides a network executor and [`RecordingExecutor`] serves dry runs
//! and tests.

pub mod args;
pub mod error;
pub mod execution_mode;
pub mod executor;
pub mod harness;
pub mod recording;
pub mod report;
pub mod request;

pub use args::{CommonBenchArgs, TableArgs};
pub use error::HarnessError;
pub use execution_mode::ExecutionMode;
pub use executor::{BoxError, TransactionalExecutor};
pub use harness::BenchHarness;
pub use recording::{ExecutorCall, RecordingExecutor};
pub use report::{BenchReport, TimingWindow};
pub use request::BenchRequest;

//! Benchmark command handlers.

pub mod logging;
pub mod output;
pub mod run;

pub use logging::mask_connection_password;
pub use output::{format_report, OutputFormat};
pub use run::{read_request, run_benchmark, run_with_executor};

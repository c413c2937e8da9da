//! CLI argument definitions shared by every executor backend.

use crate::request::BenchRequest;
use clap::Args;
use pkbench_generator::{ConfigError, TableLayout};

/// Benchmark arguments common to all backends.
#[derive(Args, Clone, Debug)]
pub struct CommonBenchArgs {
    /// Key generation mode (e.g. farm_fingerprint_concat, random_num_2, timestamp_random_num)
    #[arg(long, default_value = "farm_fingerprint_concat")]
    pub mode: String,

    /// Execution mode: single, batch or batch_only
    #[arg(long = "testmode", default_value = "single")]
    pub test_mode: String,

    /// Number of rows to insert
    #[arg(long, default_value = "10")]
    pub num: i64,

    /// Delete all rows after the run (outside the timing window)
    #[arg(long)]
    pub post_delete: bool,

    /// Dry-run mode: build and record statements without contacting the database
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub table: TableArgs,
}

impl CommonBenchArgs {
    /// Validate the mode names and row count.
    pub fn to_request(&self) -> Result<BenchRequest, ConfigError> {
        BenchRequest::parse(&self.mode, &self.test_mode, self.num, self.post_delete)
    }
}

/// Target table layout. The table must already exist.
#[derive(Args, Clone, Debug)]
pub struct TableArgs {
    /// Table to insert into
    #[arg(long, default_value = "Singers")]
    pub table: String,

    /// Integer primary key column
    #[arg(long, default_value = "SingerId")]
    pub key_column: String,

    /// First name column
    #[arg(long, default_value = "FirstName")]
    pub first_name_column: String,

    /// Last name column
    #[arg(long, default_value = "LastName")]
    pub last_name_column: String,
}

impl From<&TableArgs> for TableLayout {
    fn from(args: &TableArgs) -> Self {
        Self {
            table: args.table.clone(),
            key_column: args.key_column.clone(),
            first_name_column: args.first_name_column.clone(),
            last_name_column: args.last_name_column.clone(),
        }
    }
}

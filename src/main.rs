//! Command-line interface for spanner-pk-bench
//!
//! # Usage Examples
//!
//! ```bash
//! # Batch insert of 500 rows keyed by FARM_FINGERPRINT of a random string
//! spanner-pk-bench run \
//!   --mode farm_fingerprint_random \
//!   --testmode batch \
//!   --num 500 \
//!   --database-id my-db
//!
//! # Same request as a JSON body, followed by a delete-all
//! spanner-pk-bench request --file request.json --output-format json
//! ```
//!
//! ## Modes
//! - Key strategies: `farm_fingerprint_concat`, `farm_fingerprint_random`,
//!   `random_num`, `random_num_2`, `timestamp_random_num`,
//!   `timestamp_random_num_2`, `random_num_timestamp`
//! - Execution modes: `single`, `batch`, `batch_only`

use clap::{Parser, Subcommand};
use pkbench_generator::TableLayout;
use pkbench_harness::{CommonBenchArgs, TableArgs};
use pkbench_harness_postgresql::SpannerTargetArgs;
use spanner_pk_bench::bench::{read_request, run_benchmark, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spanner-pk-bench")]
#[command(about = "Benchmark Cloud Spanner inserts across primary-key strategies")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one benchmark configured by flags
    Run {
        #[command(flatten)]
        bench: CommonBenchArgs,

        #[command(flatten)]
        target: SpannerTargetArgs,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Run one benchmark configured by a JSON request body
    /// (`{"mode": ..., "testmode": ..., "num": ..., "delete": ...}`)
    Request {
        /// File holding the request body; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,

        /// Dry-run mode: build and record statements without contacting the database
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        table: TableArgs,

        #[command(flatten)]
        target: SpannerTargetArgs,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        output_format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            bench,
            target,
            output_format,
        } => {
            // Reject unknown modes before touching the database
            let request = bench.to_request()?;
            let table = TableLayout::from(&bench.table);
            run_benchmark(&request, table, &target, bench.dry_run, output_format).await?;
        }
        Commands::Request {
            file,
            dry_run,
            table,
            target,
            output_format,
        } => {
            let request = read_request(file.as_deref())?;
            let table = TableLayout::from(&table);
            run_benchmark(&request, table, &target, dry_run, output_format).await?;
        }
    }

    Ok(())
}

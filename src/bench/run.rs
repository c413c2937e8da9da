//! Benchmark command runner.

use anyhow::Context;
use pkbench_generator::{SqlDialect, TableLayout};
use pkbench_harness::{
    BenchHarness, BenchReport, BenchRequest, RecordingExecutor, TransactionalExecutor,
};
use pkbench_harness_postgresql::{PostgreSQLExecutor, SpannerTargetArgs};
use std::io::Read;
use std::path::Path;

use super::{format_report, mask_connection_password, OutputFormat};

/// Read a JSON request body from a file, or from stdin when no file is given.
pub fn read_request(file: Option<&Path>) -> anyhow::Result<BenchRequest> {
    let body = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request from {}", path.display()))?,
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request from stdin")?;
            body
        }
    };
    BenchRequest::from_json(&body).context("Failed to parse request")
}

/// Run one benchmark against Spanner, or against a recording executor in
/// dry-run mode, and print the report.
pub async fn run_benchmark(
    request: &BenchRequest,
    table: TableLayout,
    target: &SpannerTargetArgs,
    dry_run: bool,
    format: OutputFormat,
) -> anyhow::Result<BenchReport> {
    if dry_run {
        tracing::info!(
            "[DRY-RUN] Would insert {} rows into {} (mode={}, testmode={})",
            request.num,
            table.table,
            request.mode,
            request.execution_mode
        );
        // Statements are logged at debug level as they arrive, not kept.
        let executor = RecordingExecutor::counting().with_dialect(SqlDialect::PostgreSql);
        let report = run_with_executor(&executor, request, table, format).await?;
        tracing::info!("[DRY-RUN] Recorded {} executor calls", executor.call_count());
        return Ok(report);
    }

    if let Some(name) = target.database_name() {
        tracing::info!("Target database: {}", name);
    }
    let connection_string = target.connection_string()?;
    tracing::info!(
        "Connecting through PGAdapter: {}",
        mask_connection_password(&connection_string)
    );

    let executor = PostgreSQLExecutor::connect(&connection_string)
        .await
        .context("Failed to connect to Spanner through PGAdapter")?;

    run_with_executor(&executor, request, table, format).await
}

/// Drive the harness over any executor and print the outcome.
///
/// A failed cleanup still prints the finished measurement before the error
/// is returned.
pub async fn run_with_executor<X>(
    executor: &X,
    request: &BenchRequest,
    table: TableLayout,
    format: OutputFormat,
) -> anyhow::Result<BenchReport>
where
    X: TransactionalExecutor + ?Sized,
{
    let mut harness = BenchHarness::new(executor).with_table(table);
    match harness.run(request).await {
        Ok(report) => {
            println!("{}", format_report(&report, format)?);
            Ok(report)
        }
        Err(e) => {
            if let Some(report) = e.report() {
                println!("{}", format_report(report, format)?);
            }
            Err(e).context("Benchmark run failed")
        }
    }
}

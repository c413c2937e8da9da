//! Report rendering.

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use pkbench_harness::BenchReport;

/// How a finished report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `term num:<rows> nanotime:<elapsed>` line
    Text,
    /// Table with every measurement
    Table,
    /// JSON object
    Json,
}

/// Render a report in the requested format.
pub fn format_report(report: &BenchReport, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Text => format!(
            "mode:{}, testMode:{}\nterm num:{} nanotime:{}",
            report.mode,
            report.execution_mode,
            report.rows,
            report.elapsed_nanos()
        ),
        OutputFormat::Table => format_table(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    };
    Ok(rendered)
}

fn format_table(report: &BenchReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Mode",
        "Execution",
        "Rows",
        "Elapsed (ns)",
        "Construction (ns)",
        "Total (ns)",
        "Rows/sec",
        "Cleaned up",
    ]);
    table.add_row(vec![
        Cell::new(report.mode),
        Cell::new(report.execution_mode),
        Cell::new(report.rows),
        Cell::new(report.elapsed_nanos()),
        Cell::new(
            report
                .construction
                .map(|d| d.as_nanos().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        Cell::new(report.total_elapsed().as_nanos()),
        Cell::new(format!("{:.2}", report.rows_per_second())),
        Cell::new(
            report
                .cleanup_rows
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);
    table.to_string()
}

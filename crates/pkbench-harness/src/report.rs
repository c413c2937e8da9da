//! Timing output of a harness run.

use crate::execution_mode::ExecutionMode;
use pkbench_generator::Mode;
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Start/end pair on the monotonic clock bounding one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingWindow {
    start: Instant,
    end: Instant,
}

/// A window whose start has been recorded but whose end has not.
#[derive(Debug)]
pub struct OpenWindow {
    start: Instant,
}

impl TimingWindow {
    /// Record the start of a window.
    pub fn open() -> OpenWindow {
        OpenWindow {
            start: Instant::now(),
        }
    }

    /// Window start.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Window end.
    pub fn end(&self) -> Instant {
        self.end
    }

    /// Elapsed time between start and end.
    pub fn elapsed(&self) -> Duration {
        self.end.duration_since(self.start)
    }

    /// Elapsed time in nanoseconds, saturating at `u64::MAX`.
    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl OpenWindow {
    /// Record the end of the window.
    pub fn close(self) -> TimingWindow {
        TimingWindow {
            start: self.start,
            end: Instant::now(),
        }
    }
}

impl Serialize for TimingWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.elapsed_nanos())
    }
}

fn serialize_opt_nanos<S: Serializer>(
    value: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serializer.serialize_some(&u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
        None => serializer.serialize_none(),
    }
}

/// Result of one harness run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// Identifier of the run, also attached to its log lines.
    pub run_id: Uuid,
    pub mode: Mode,
    pub execution_mode: ExecutionMode,
    /// Number of rows generated and submitted.
    pub rows: u64,
    /// The measured window, serialized as elapsed nanoseconds.
    #[serde(rename = "elapsed_nanos")]
    pub window: TimingWindow,
    /// Statement construction time outside the window (`batch` only).
    #[serde(rename = "construction_nanos", serialize_with = "serialize_opt_nanos")]
    pub construction: Option<Duration>,
    /// Sum of rows affected reported by the executor.
    pub rows_affected: i64,
    /// Rows removed by the post-run cleanup, if it ran.
    pub cleanup_rows: Option<i64>,
}

impl BenchReport {
    /// Elapsed nanoseconds of the measured window.
    pub fn elapsed_nanos(&self) -> u64 {
        self.window.elapsed_nanos()
    }

    /// Window time plus any construction time measured outside it.
    pub fn total_elapsed(&self) -> Duration {
        self.window.elapsed() + self.construction.unwrap_or_default()
    }

    /// Rows per second over the measured window.
    pub fn rows_per_second(&self) -> f64 {
        let secs = self.window.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.rows as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(nanos: u64) -> TimingWindow {
        let start = Instant::now();
        TimingWindow {
            start,
            end: start + Duration::from_nanos(nanos),
        }
    }

    fn report(rows: u64, nanos: u64) -> BenchReport {
        BenchReport {
            run_id: Uuid::nil(),
            mode: Mode::RandNum,
            execution_mode: ExecutionMode::Batch,
            rows,
            window: window(nanos),
            construction: Some(Duration::from_nanos(500)),
            rows_affected: rows as i64,
            cleanup_rows: None,
        }
    }

    #[test]
    fn test_window_elapsed() {
        let w = window(1_500);
        assert_eq!(w.elapsed_nanos(), 1_500);
        assert!(w.end() >= w.start());

        let open = TimingWindow::open();
        let closed = open.close();
        assert!(closed.end() >= closed.start());
    }

    #[test]
    fn test_rows_per_second() {
        let r = report(1000, 2_000_000_000);
        assert_eq!(r.rows_per_second(), 500.0);
        assert_eq!(report(10, 0).rows_per_second(), 0.0);
    }

    #[test]
    fn test_total_elapsed_includes_construction() {
        let r = report(1, 1_000);
        assert_eq!(r.total_elapsed(), Duration::from_nanos(1_500));
        assert_eq!(r.elapsed_nanos(), 1_000);
    }

    #[test]
    fn test_serialize_report() {
        let json = serde_json::to_value(report(3, 42)).unwrap();
        assert_eq!(json["mode"], "random_num");
        assert_eq!(json["execution_mode"], "batch");
        assert_eq!(json["elapsed_nanos"], 42);
        assert_eq!(json["construction_nanos"], 500);
        assert_eq!(json["rows"], 3);
        assert!(json["cleanup_rows"].is_null());
    }
}

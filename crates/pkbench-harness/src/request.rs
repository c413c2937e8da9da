//! Benchmark run parameters.

use crate::error::HarnessError;
use crate::execution_mode::ExecutionMode;
use pkbench_generator::{ConfigError, Mode};
use serde::{Deserialize, Serialize};

/// Number of rows inserted when a request does not say otherwise.
pub const DEFAULT_ROW_COUNT: u64 = 10;

/// Validated parameters of one harness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchRequest {
    pub mode: Mode,
    pub execution_mode: ExecutionMode,
    pub num: u64,
    pub delete: bool,
}

/// Request body as sent to the HTTP entry point:
/// `{"mode": "...", "testmode": "...", "num": 10, "delete": false}`.
#[derive(Debug, Deserialize)]
struct RawBenchRequest {
    mode: String,
    #[serde(rename = "testmode")]
    test_mode: String,
    #[serde(default = "default_row_count")]
    num: i64,
    #[serde(default)]
    delete: bool,
}

fn default_row_count() -> i64 {
    DEFAULT_ROW_COUNT as i64
}

impl BenchRequest {
    /// Create a request without post-run cleanup.
    pub fn new(mode: Mode, execution_mode: ExecutionMode, num: u64) -> Self {
        Self {
            mode,
            execution_mode,
            num,
            delete: false,
        }
    }

    /// Enable or disable the post-run delete-all.
    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    /// Validate a request given by name.
    pub fn parse(
        mode: &str,
        execution_mode: &str,
        num: i64,
        delete: bool,
    ) -> Result<Self, ConfigError> {
        let mode: Mode = mode.parse()?;
        let execution_mode: ExecutionMode = execution_mode.parse()?;
        let num = u64::try_from(num).map_err(|_| ConfigError::InvalidRowCount(num))?;
        Ok(Self::new(mode, execution_mode, num).with_delete(delete))
    }

    /// Decode and validate a JSON request body.
    pub fn from_json(body: &str) -> Result<Self, HarnessError> {
        let raw: RawBenchRequest = serde_json::from_str(body)?;
        Ok(Self::parse(&raw.mode, &raw.test_mode, raw.num, raw.delete)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let request = BenchRequest::parse("random_num_2", "batch_only", 3, true).unwrap();
        assert_eq!(request.mode, Mode::RandNum2);
        assert_eq!(request.execution_mode, ExecutionMode::BatchOnly);
        assert_eq!(request.num, 3);
        assert!(request.delete);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert!(matches!(
            BenchRequest::parse("nope", "single", 1, false),
            Err(ConfigError::UnknownMode(_))
        ));
        assert!(matches!(
            BenchRequest::parse("random_num", "nope", 1, false),
            Err(ConfigError::UnknownExecutionMode(_))
        ));
        assert_eq!(
            BenchRequest::parse("random_num", "single", -1, false),
            Err(ConfigError::InvalidRowCount(-1))
        );
    }

    #[test]
    fn test_from_json() {
        let body = r#"{"mode": "timestamp_random_num", "testmode": "batch", "num": 25, "delete": true}"#;
        let request = BenchRequest::from_json(body).unwrap();
        assert_eq!(
            request,
            BenchRequest::new(Mode::TimestampRandomNum, ExecutionMode::Batch, 25).with_delete(true)
        );
    }

    #[test]
    fn test_from_json_defaults() {
        let body = r#"{"mode": "random_num", "testmode": "single"}"#;
        let request = BenchRequest::from_json(body).unwrap();
        assert_eq!(request.num, DEFAULT_ROW_COUNT);
        assert!(!request.delete);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            BenchRequest::from_json("{not json"),
            Err(HarnessError::InvalidRequest(_))
        ));
        assert!(matches!(
            BenchRequest::from_json(r#"{"mode": "x", "testmode": "single"}"#),
            Err(HarnessError::Config(ConfigError::UnknownMode(_)))
        ));
    }
}

//! Key-generation mode selection.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mode names that are accepted as input but carry no key strategy.
const UNSUPPORTED_MODES: &[&str] = &["farm_fingerprint_single_col", "farm_fingerprint_uuidv4"];

/// Key-generation strategy for one harness run.
///
/// The set is closed: every variant maps to exactly one strategy in
/// [`crate::strategies`], selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Database computes `FARM_FINGERPRINT(CONCAT(first_name, last_name))`.
    #[serde(rename = "farm_fingerprint_concat")]
    FarmFingerPrintConcat,
    /// Database computes `FARM_FINGERPRINT(random_string(20))`.
    #[serde(rename = "farm_fingerprint_random")]
    FarmFingerPrintRandom,
    /// Signed 63-bit random integer.
    #[serde(rename = "random_num")]
    RandNum,
    /// Xorshift (13, 7, 17) scramble of the sequence counter.
    #[serde(rename = "random_num_2")]
    RandNum2,
    /// `(unix_seconds << 32) | random_u32`.
    #[serde(rename = "timestamp_random_num")]
    TimestampRandomNum,
    /// Snowflake ID with the sequence counter as node id.
    #[serde(rename = "timestamp_random_num_2")]
    TimestampRandomNum2,
    /// `(random_u32 << 32) + unix_seconds`.
    #[serde(rename = "random_num_timestamp")]
    RandNumTimestamp,
}

impl Mode {
    /// All modes, in the order they are documented.
    pub const ALL: [Mode; 7] = [
        Mode::FarmFingerPrintConcat,
        Mode::FarmFingerPrintRandom,
        Mode::RandNum,
        Mode::RandNum2,
        Mode::TimestampRandomNum,
        Mode::TimestampRandomNum2,
        Mode::RandNumTimestamp,
    ];

    /// Wire name of the mode, as accepted by `--mode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::FarmFingerPrintConcat => "farm_fingerprint_concat",
            Mode::FarmFingerPrintRandom => "farm_fingerprint_random",
            Mode::RandNum => "random_num",
            Mode::RandNum2 => "random_num_2",
            Mode::TimestampRandomNum => "timestamp_random_num",
            Mode::TimestampRandomNum2 => "timestamp_random_num_2",
            Mode::RandNumTimestamp => "random_num_timestamp",
        }
    }

    /// Whether the key is computed by the database rather than bound as a parameter.
    pub fn is_database_computed(&self) -> bool {
        matches!(
            self,
            Mode::FarmFingerPrintConcat | Mode::FarmFingerPrintRandom
        )
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(mode) = Mode::ALL.iter().find(|m| m.as_str() == s) {
            return Ok(*mode);
        }
        if UNSUPPORTED_MODES.contains(&s) {
            return Err(ConfigError::UnsupportedMode(s.to_string()));
        }
        Err(ConfigError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_modes() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "sequential".parse::<Mode>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownMode("sequential".to_string()));
    }

    #[test]
    fn test_parse_unsupported_mode() {
        let err = "farm_fingerprint_uuidv4".parse::<Mode>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedMode(_)));
    }

    #[test]
    fn test_deserialize_wire_names() {
        use serde::de::value::{Error, StrDeserializer};
        use serde::de::IntoDeserializer;

        for mode in Mode::ALL {
            let de: StrDeserializer<'_, Error> = mode.as_str().into_deserializer();
            assert_eq!(Mode::deserialize(de).unwrap(), mode);
        }
    }

    #[test]
    fn test_database_computed_modes() {
        let computed: Vec<Mode> = Mode::ALL
            .into_iter()
            .filter(|m| m.is_database_computed())
            .collect();
        assert_eq!(
            computed,
            vec![Mode::FarmFingerPrintConcat, Mode::FarmFingerPrintRandom]
        );
    }
}

//! Per-run row sequence counter.

use crate::error::KeyGenError;

/// Monotonic row sequence number owned by one harness run.
///
/// Unset until the harness advances it for the first row. For row index `i`
/// the value is `i + 1`, so the first row observes 1. The value never
/// decreases or repeats within a run.
#[derive(Debug, Default, Clone)]
pub struct SequenceCounter {
    value: Option<i64>,
}

impl SequenceCounter {
    /// Create an unset counter for a new run.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Set the counter for the 0-based row index, returning the new value.
    pub fn advance_to_row(&mut self, row_index: u64) -> Result<i64, KeyGenError> {
        let requested = i64::try_from(row_index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .ok_or(KeyGenError::CounterRegression {
                current: self.value.unwrap_or(0),
                requested: i64::MAX,
            })?;

        if let Some(current) = self.value {
            if requested <= current {
                return Err(KeyGenError::CounterRegression { current, requested });
            }
        }

        self.value = Some(requested);
        Ok(requested)
    }

    /// Current value for the row being generated.
    pub fn current(&self) -> Result<i64, KeyGenError> {
        self.value.ok_or(KeyGenError::CounterUnset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_counter_cannot_be_read() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.current(), Err(KeyGenError::CounterUnset));
    }

    #[test]
    fn test_counter_is_one_based() {
        let mut counter = SequenceCounter::new();
        for i in 0..3u64 {
            assert_eq!(counter.advance_to_row(i).unwrap(), i as i64 + 1);
            assert_eq!(counter.current().unwrap(), i as i64 + 1);
        }
    }

    #[test]
    fn test_counter_never_repeats() {
        let mut counter = SequenceCounter::new();
        counter.advance_to_row(4).unwrap();

        assert_eq!(
            counter.advance_to_row(4),
            Err(KeyGenError::CounterRegression {
                current: 5,
                requested: 5
            })
        );
        assert!(counter.advance_to_row(2).is_err());
        assert_eq!(counter.current().unwrap(), 5);
    }
}

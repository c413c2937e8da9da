//! Key derivation strategies, one per [`Mode`].
//!
//! Each strategy is a pure function of the sequence counter, the entropy
//! source and the clock. The two fingerprint strategies leave the key to
//! the database and only supply the hash input.

pub mod fingerprint;
pub mod random;
pub mod snowflake;
pub mod timestamp;
pub mod xorshift;

use crate::clock::Clock;
use crate::counter::SequenceCounter;
use crate::entropy::EntropySource;
use crate::error::KeyGenError;
use crate::mode::Mode;

/// Key material derived for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Key computed client-side, bound as the `key` parameter.
    Literal(i64),
    /// Database hashes the concatenated `firstName` and `lastName` parameters.
    FingerprintOfNames,
    /// Database hashes this string, bound as the `key` parameter.
    FingerprintOf(String),
}

impl KeyMaterial {
    /// The client-side key, if this material carries one.
    pub fn literal(&self) -> Option<i64> {
        match self {
            KeyMaterial::Literal(key) => Some(*key),
            _ => None,
        }
    }
}

impl Mode {
    /// Derive the key material for the row the counter currently points at.
    ///
    /// Only [`Mode::RandNum2`] and [`Mode::TimestampRandomNum2`] read the
    /// counter; both fail with [`KeyGenError::CounterUnset`] before the
    /// harness has set it.
    pub fn derive_key<S, C>(
        &self,
        counter: &SequenceCounter,
        entropy: &mut S,
        clock: &C,
    ) -> Result<KeyMaterial, KeyGenError>
    where
        S: EntropySource + ?Sized,
        C: Clock + ?Sized,
    {
        let key = match self {
            Mode::FarmFingerPrintConcat => KeyMaterial::FingerprintOfNames,
            Mode::FarmFingerPrintRandom => {
                KeyMaterial::FingerprintOf(fingerprint::random_hash_input(entropy))
            }
            Mode::RandNum => KeyMaterial::Literal(random::random_key(entropy)),
            Mode::RandNum2 => KeyMaterial::Literal(xorshift::scramble_sequence(counter.current()?)),
            Mode::TimestampRandomNum => KeyMaterial::Literal(timestamp::pack_timestamp_high(
                clock.now_unix_seconds(),
                entropy.random_u32(),
            )),
            Mode::TimestampRandomNum2 => {
                let mut node = snowflake::SnowflakeNode::new(counter.current()?)?;
                KeyMaterial::Literal(node.generate(clock)?.as_i64())
            }
            Mode::RandNumTimestamp => KeyMaterial::Literal(timestamp::pack_random_high(
                entropy.random_u32(),
                clock.now_unix_seconds(),
            )),
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn counter_at(row_index: u64) -> SequenceCounter {
        let mut counter = SequenceCounter::new();
        counter.advance_to_row(row_index).unwrap();
        counter
    }

    #[test]
    fn test_fingerprint_modes_have_no_literal_key() {
        let mut rng = StdRng::seed_from_u64(42);
        let clock = FixedClock::from_seconds(1_700_000_000);
        let counter = counter_at(0);

        let concat = Mode::FarmFingerPrintConcat
            .derive_key(&counter, &mut rng, &clock)
            .unwrap();
        assert_eq!(concat, KeyMaterial::FingerprintOfNames);
        assert_eq!(concat.literal(), None);

        let random = Mode::FarmFingerPrintRandom
            .derive_key(&counter, &mut rng, &clock)
            .unwrap();
        match random {
            KeyMaterial::FingerprintOf(input) => assert_eq!(input.len(), 20),
            other => panic!("Expected FingerprintOf, got {other:?}"),
        }
    }

    #[test]
    fn test_counter_modes_fail_before_counter_is_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let clock = FixedClock::from_seconds(1_700_000_000);
        let counter = SequenceCounter::new();

        for mode in [Mode::RandNum2, Mode::TimestampRandomNum2] {
            assert_eq!(
                mode.derive_key(&counter, &mut rng, &clock),
                Err(KeyGenError::CounterUnset)
            );
        }

        // Modes that ignore the counter still work.
        assert!(Mode::RandNum.derive_key(&counter, &mut rng, &clock).is_ok());
    }

    #[test]
    fn test_rand_num_2_uses_counter() {
        let mut rng = StdRng::seed_from_u64(42);
        let clock = FixedClock::from_seconds(1_700_000_000);

        let key = Mode::RandNum2
            .derive_key(&counter_at(0), &mut rng, &clock)
            .unwrap();
        assert_eq!(key, KeyMaterial::Literal(1_082_269_761));
    }

    #[test]
    fn test_timestamp_random_num_2_node_id_from_counter() {
        let mut rng = StdRng::seed_from_u64(42);
        let clock = FixedClock::from_millis(snowflake::EPOCH_MILLIS + 5_000);

        let key = Mode::TimestampRandomNum2
            .derive_key(&counter_at(6), &mut rng, &clock)
            .unwrap()
            .literal()
            .unwrap();
        let id = snowflake::SnowflakeId::from_i64(key);
        assert_eq!(id.node(), 7);
        assert_eq!(id.step(), 0);
        assert_eq!(id.timestamp_millis(), snowflake::EPOCH_MILLIS + 5_000);
    }

    #[test]
    fn test_timestamp_random_num_2_rejects_out_of_range_node() {
        let mut rng = StdRng::seed_from_u64(42);
        let clock = FixedClock::from_seconds(1_700_000_000);

        // Row index 1023 yields counter 1024, one past the last node id.
        let result = Mode::TimestampRandomNum2.derive_key(&counter_at(1023), &mut rng, &clock);
        assert_eq!(
            result,
            Err(KeyGenError::InvalidNodeId {
                node_id: 1024,
                max: 1023
            })
        );
    }

    #[test]
    fn test_same_inputs_same_key() {
        let clock = FixedClock::from_seconds(1_700_000_000);
        let counter = counter_at(2);

        for mode in Mode::ALL {
            let mut rng1 = StdRng::seed_from_u64(9);
            let mut rng2 = StdRng::seed_from_u64(9);
            assert_eq!(
                mode.derive_key(&counter, &mut rng1, &clock),
                mode.derive_key(&counter, &mut rng2, &clock),
                "mode {mode} is not deterministic"
            );
        }
    }
}

//! Keys packing a unix timestamp and a random word.

/// `(unix_seconds << 32) | random`: timestamp in the high bits.
///
/// Keys sort by second; keys within the same second are unordered.
pub fn pack_timestamp_high(unix_seconds: i64, random: u32) -> i64 {
    (unix_seconds << 32) | i64::from(random)
}

/// `(random << 32) + unix_seconds`: random high bits, timestamp low bits.
///
/// The high bits may land in the sign bit; the addition wraps.
pub fn pack_random_high(random: u32, unix_seconds: i64) -> i64 {
    (i64::from(random) << 32).wrapping_add(unix_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::HashSet;

    const TS: i64 = 1_700_000_000;

    #[test]
    fn test_exact_packing() {
        let random = 0xDEAD_BEEF_u32;
        assert_eq!(pack_timestamp_high(TS, random), (TS << 32) | random as i64);
        assert_eq!(pack_timestamp_high(TS, random), 7_301_444_406_935_928_559);
        assert_eq!(
            pack_random_high(random, TS),
            ((random as i64) << 32).wrapping_add(TS)
        );
        assert_eq!(pack_random_high(random, TS), -2_401_053_090_912_145_152);
    }

    #[test]
    fn test_packing_orders_differ() {
        let random = 12_345_u32;
        assert_ne!(pack_timestamp_high(TS, random), pack_random_high(random, TS));
    }

    #[test]
    fn test_timestamp_recoverable() {
        let random = 0xFFFF_FFFF_u32;
        assert_eq!(pack_timestamp_high(TS, random) >> 32, TS);
        assert_eq!(pack_random_high(7, TS) & 0xFFFF_FFFF, TS);
    }

    #[test]
    fn test_same_second_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let keys: HashSet<i64> = (0..10_000)
            .map(|_| pack_timestamp_high(TS, rng.next_u32()))
            .collect();
        assert_eq!(keys.len(), 10_000);
        assert!(keys.iter().all(|k| k >> 32 == TS));
    }
}

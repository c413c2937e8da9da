//! Fully random keys.

use crate::entropy::EntropySource;

/// Random key over the full non-negative 63-bit range (no modulo reduction).
pub fn random_key<S: EntropySource + ?Sized>(entropy: &mut S) -> i64 {
    entropy.random_i63()
}

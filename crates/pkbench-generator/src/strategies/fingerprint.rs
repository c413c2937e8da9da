//! Hash inputs for the database-computed fingerprint keys.

use crate::entropy::EntropySource;

/// Length of the random string hashed by `farm_fingerprint_random`.
pub const HASH_INPUT_LENGTH: usize = 20;

/// Random string the database hashes into the key.
///
/// Drawn separately from the row's own name strings.
pub fn random_hash_input<S: EntropySource + ?Sized>(entropy: &mut S) -> String {
    entropy.random_string(HASH_INPUT_LENGTH)
}

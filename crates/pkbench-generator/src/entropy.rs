//! Random inputs for key and row generation.

use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};

/// Source of the random values the strategies consume.
///
/// Implemented for every [`RngCore`]. Production runs use
/// `StdRng::from_entropy()` (a CSPRNG seeded from the OS); tests use
/// `StdRng::seed_from_u64` for reproducible output.
pub trait EntropySource {
    /// Random alphanumeric string of `len` characters.
    fn random_string(&mut self, len: usize) -> String;

    /// Non-negative random integer spanning the full 63-bit range.
    fn random_i63(&mut self) -> i64;

    /// Random 32-bit unsigned integer.
    fn random_u32(&mut self) -> u32;
}

impl<R: RngCore + ?Sized> EntropySource for R {
    fn random_string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.sample(Alphanumeric)))
            .collect()
    }

    fn random_i63(&mut self) -> i64 {
        (self.next_u64() >> 1) as i64
    }

    fn random_u32(&mut self) -> u32 {
        self.next_u32()
    }
}

//! Xorshift scramble of the row sequence number.

/// Scramble a sequence number with the xorshift triplet (13, 7, 17).
///
/// The right shift is arithmetic. Each step is invertible, so distinct
/// inputs always give distinct keys.
pub fn scramble_sequence(sequence: i64) -> i64 {
    let mut x = sequence;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

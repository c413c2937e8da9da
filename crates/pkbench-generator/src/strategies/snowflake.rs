//! Snowflake-style ID generation.
//!
//! Layout (most significant first): 41-bit milliseconds since
//! [`EPOCH_MILLIS`], 10-bit node id, 12-bit per-millisecond step.

use crate::clock::Clock;
use crate::error::KeyGenError;

/// Custom epoch in unix milliseconds (2010-11-04T01:42:54.657Z).
pub const EPOCH_MILLIS: i64 = 1_288_834_974_657;

/// Bits reserved for the node id.
pub const NODE_BITS: u32 = 10;

/// Bits reserved for the per-millisecond step.
pub const STEP_BITS: u32 = 12;

/// Largest valid node id.
pub const NODE_MAX: i64 = (1 << NODE_BITS) - 1;

const STEP_MASK: i64 = (1 << STEP_BITS) - 1;
const NODE_SHIFT: u32 = STEP_BITS;
const TIME_SHIFT: u32 = NODE_BITS + STEP_BITS;

/// A generated Snowflake ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId(i64);

impl SnowflakeId {
    /// Wrap a raw 64-bit ID.
    pub fn from_i64(raw: i64) -> Self {
        Self(raw)
    }

    /// The ID as a signed 64-bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Generation time in unix milliseconds.
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> TIME_SHIFT) + EPOCH_MILLIS
    }

    /// Node id the ID was generated on.
    pub fn node(&self) -> i64 {
        (self.0 >> NODE_SHIFT) & NODE_MAX
    }

    /// Step within the generation millisecond.
    pub fn step(&self) -> i64 {
        self.0 & STEP_MASK
    }
}

/// Generator bound to one node id.
#[derive(Debug)]
pub struct SnowflakeNode {
    node: i64,
    last_millis: i64,
    step: i64,
}

impl SnowflakeNode {
    /// Create a generator for `node`, which must lie in `0..=NODE_MAX`.
    pub fn new(node: i64) -> Result<Self, KeyGenError> {
        if !(0..=NODE_MAX).contains(&node) {
            return Err(KeyGenError::InvalidNodeId {
                node_id: node,
                max: NODE_MAX,
            });
        }
        Ok(Self {
            node,
            last_millis: 0,
            step: 0,
        })
    }

    /// Node id of this generator.
    pub fn node(&self) -> i64 {
        self.node
    }

    /// Generate the next ID.
    ///
    /// When the step space of the current millisecond is exhausted, spins
    /// until the clock moves to the next millisecond. A clock that never
    /// advances (such as [`FixedClock`](crate::clock::FixedClock)) therefore
    /// blocks forever on the 4097th call; the harness builds a fresh node
    /// per row.
    pub fn generate<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<SnowflakeId, KeyGenError> {
        let mut now = self.elapsed_millis(clock)?;

        if now == self.last_millis {
            self.step = (self.step + 1) & STEP_MASK;
            if self.step == 0 {
                while now <= self.last_millis {
                    std::hint::spin_loop();
                    now = self.elapsed_millis(clock)?;
                }
            }
        } else {
            self.step = 0;
        }

        self.last_millis = now;

        Ok(SnowflakeId(
            (now << TIME_SHIFT) | (self.node << NODE_SHIFT) | self.step,
        ))
    }

    fn elapsed_millis<C: Clock + ?Sized>(&self, clock: &C) -> Result<i64, KeyGenError> {
        let now_millis = clock.now_unix_millis();
        if now_millis < EPOCH_MILLIS {
            return Err(KeyGenError::ClockBeforeEpoch { now_millis });
        }
        Ok(now_millis - EPOCH_MILLIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SystemClock};

    #[test]
    fn test_node_range() {
        assert!(SnowflakeNode::new(0).is_ok());
        assert!(SnowflakeNode::new(NODE_MAX).is_ok());
        assert_eq!(
            SnowflakeNode::new(-1).unwrap_err(),
            KeyGenError::InvalidNodeId {
                node_id: -1,
                max: 1023
            }
        );
        assert!(SnowflakeNode::new(1024).is_err());
    }

    #[test]
    fn test_layout() {
        let clock = FixedClock::from_millis(EPOCH_MILLIS + 1);
        let mut node = SnowflakeNode::new(1).unwrap();
        let id = node.generate(&clock).unwrap();

        assert_eq!(id.as_i64(), (1 << 22) | (1 << 12));
        assert_eq!(id.node(), 1);
        assert_eq!(id.step(), 0);
        assert_eq!(id.timestamp_millis(), EPOCH_MILLIS + 1);
    }

    #[test]
    fn test_step_increments_within_millisecond() {
        let clock = FixedClock::from_millis(1_700_000_000_000);
        let mut node = SnowflakeNode::new(3).unwrap();

        let ids: Vec<SnowflakeId> = (0..3).map(|_| node.generate(&clock).unwrap()).collect();
        assert_eq!(
            ids.iter().map(|id| id.step()).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    /// Reports `start` for the first `hold` reads, then one millisecond later.
    struct SteppingClock {
        start: i64,
        hold: usize,
        reads: std::cell::Cell<usize>,
    }

    impl Clock for SteppingClock {
        fn now_unix_millis(&self) -> i64 {
            let reads = self.reads.get();
            self.reads.set(reads + 1);
            if reads < self.hold {
                self.start
            } else {
                self.start + 1
            }
        }
    }

    #[test]
    fn test_step_wrap_waits_for_next_millisecond() {
        let start = EPOCH_MILLIS + 10;
        let clock = SteppingClock {
            start,
            hold: 4097,
            reads: std::cell::Cell::new(0),
        };
        let mut node = SnowflakeNode::new(5).unwrap();

        let mut last = None;
        for _ in 0..4096 {
            let id = node.generate(&clock).unwrap();
            assert_eq!(id.timestamp_millis(), start);
            last = Some(id);
        }
        assert_eq!(last.map(|id| id.step()), Some(4095));

        let wrapped = node.generate(&clock).unwrap();
        assert_eq!(wrapped.step(), 0);
        assert_eq!(wrapped.timestamp_millis(), start + 1);
        assert!(Some(wrapped) > last);
    }

    #[test]
    fn test_monotonic_with_system_clock() {
        let mut node = SnowflakeNode::new(42).unwrap();
        let mut last = node.generate(&SystemClock).unwrap();
        for _ in 0..10_000 {
            let id = node.generate(&SystemClock).unwrap();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn test_clock_before_epoch() {
        let mut node = SnowflakeNode::new(0).unwrap();
        let err = node.generate(&FixedClock::from_millis(0)).unwrap_err();
        assert_eq!(err, KeyGenError::ClockBeforeEpoch { now_millis: 0 });
    }
}

//! Primary-key generation strategies for the spanner-pk-bench harness.
//!
//! This crate derives the key material for one inserted row and wraps it
//! into a parameterized INSERT statement. It performs no I/O: statements are
//! handed to a transactional executor by the harness crate.
//!
//! # Architecture
//!
//! ```text
//!  SequenceCounter ─┐
//!  EntropySource  ──┼──►  Mode (KeyStrategy)  ──►  KeyMaterial
//!  Clock          ──┘                                  │
//!                                                      ▼
//!                  Row { first_name, last_name } ─► StatementBuilder ─► Statement
//! ```
//!
//! # Strategies
//!
//! - `farm_fingerprint_concat` - database hashes `first_name || last_name`
//! - `farm_fingerprint_random` - database hashes a 20-char random string
//! - `random_num` - 63-bit random integer
//! - `random_num_2` - xorshift scramble of the row sequence number
//! - `timestamp_random_num` - unix seconds in the high bits, random low bits
//! - `timestamp_random_num_2` - Snowflake ID using the sequence number as node id
//! - `random_num_timestamp` - random high bits, unix seconds in the low bits
//!
//! # Example
//!
//! ```rust
//! use pkbench_generator::{Mode, Row, SequenceCounter, SqlDialect, StatementBuilder, SystemClock, TableLayout};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let builder = StatementBuilder::new(Mode::RandNum2, TableLayout::default(), SqlDialect::GoogleSql);
//! let mut counter = SequenceCounter::new();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! counter.advance_to_row(0).unwrap();
//! let row = Row::random(&mut rng);
//! let stmt = builder.build(&row, &counter, &mut rng, &SystemClock).unwrap();
//! assert!(stmt.param("key").is_some());
//! ```

pub mod builder;
pub mod clock;
pub mod counter;
pub mod entropy;
pub mod error;
pub mod mode;
pub mod statement;
pub mod strategies;

// Re-exports for convenience
pub use builder::{Row, StatementBuilder, NAME_LENGTH};
pub use clock::{Clock, FixedClock, SystemClock};
pub use counter::SequenceCounter;
pub use entropy::EntropySource;
pub use error::{ConfigError, KeyGenError};
pub use mode::Mode;
pub use statement::{ParamValue, SqlDialect, Statement, TableLayout};
pub use strategies::KeyMaterial;

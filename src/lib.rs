//! Spanner primary-key insert benchmark.
//!
//! Inserts rows into a Cloud Spanner table, deriving each row's `INT64`
//! primary key with one of several strategies, and reports how long the
//! inserts took in one of three execution modes.
//!
//! # Crates
//!
//! - `pkbench_generator` - key strategies and statement construction
//! - `pkbench_harness` - execution modes, timing and the executor seam
//! - `pkbench_harness_postgresql` - executor talking to Spanner through PGAdapter
//!
//! # CLI Usage
//!
//! ```bash
//! # 1000 single-row transactions with xorshift keys
//! spanner-pk-bench run --mode random_num_2 --testmode single --num 1000 \
//!   --project-id my-project --instance-id my-instance --database-id my-db
//!
//! # JSON request body on stdin, build statements without a database
//! echo '{"mode":"timestamp_random_num_2","testmode":"batch","num":100}' \
//!   | spanner-pk-bench request --dry-run
//! ```

pub mod bench;

//! Transactional executor abstraction.

use async_trait::async_trait;
use pkbench_generator::{SqlDialect, Statement};

/// Error type crossing the executor boundary, propagated unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A store client that runs parameterized statements in read-write
/// transactions.
///
/// Each call is atomic: either every statement in it commits or none does.
/// Retries, timeouts and authentication belong to the implementation.
#[async_trait]
pub trait TransactionalExecutor: Send + Sync {
    /// Dialect the executor expects statements to be rendered in.
    fn dialect(&self) -> SqlDialect;

    /// Run one statement in its own transaction, returning rows affected.
    async fn execute_single(&self, statement: &Statement) -> Result<i64, BoxError>;

    /// Run all statements, in order, in one transaction, returning rows
    /// affected per statement.
    async fn execute_batch(&self, statements: &[Statement]) -> Result<Vec<i64>, BoxError>;
}

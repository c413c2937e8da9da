//! In-process executor that records every call.
//!
//! Used for `--dry-run` and by the harness tests. Inserts report one
//! affected row each; a `DELETE` reports the number of rows inserted
//! since the previous delete. A [`counting`](RecordingExecutor::counting)
//! recorder keeps only the counts, so its memory does not grow with the
//! run.

use crate::executor::{BoxError, TransactionalExecutor};
use async_trait::async_trait;
use pkbench_generator::{SqlDialect, Statement};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// One call received by a [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorCall {
    Single(Statement),
    Batch(Vec<Statement>),
}

impl ExecutorCall {
    /// Statements carried by the call, in order.
    pub fn statements(&self) -> &[Statement] {
        match self {
            ExecutorCall::Single(stmt) => std::slice::from_ref(stmt),
            ExecutorCall::Batch(stmts) => stmts,
        }
    }
}

/// Failure injected by [`RecordingExecutor::fail_on_call`].
#[derive(Debug, thiserror::Error)]
#[error("Injected failure on executor call {call}")]
pub struct InjectedFailure {
    pub call: usize,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<ExecutorCall>,
    call_count: usize,
    live_rows: i64,
}

/// Executor that answers calls in memory instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    dialect: SqlDialect,
    fail_on_call: Option<usize>,
    counting_only: bool,
    state: Mutex<State>,
}

impl RecordingExecutor {
    /// Create a recorder expecting GoogleSQL statements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that counts calls and rows without keeping statements.
    pub fn counting() -> Self {
        Self {
            counting_only: true,
            ..Self::default()
        }
    }

    /// Expect statements in `dialect`.
    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Fail the 0-based `call`-th executor call (it is still recorded).
    pub fn fail_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// All calls received so far (empty for a counting recorder).
    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.lock().calls.clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.lock().call_count
    }

    /// Every statement received so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock()
            .calls
            .iter()
            .flat_map(|c| c.statements().iter().cloned())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(
        &self,
        statements: &[Statement],
        to_call: impl FnOnce() -> ExecutorCall,
    ) -> Result<Vec<i64>, BoxError> {
        let mut state = self.lock();
        let index = state.call_count;

        let mut live_rows = state.live_rows;
        let mut affected = Vec::with_capacity(statements.len());
        for stmt in statements {
            debug!("[DRY-RUN] {} {:?}", stmt.sql(), stmt.params());
            if stmt.sql().trim_start().starts_with("DELETE") {
                affected.push(live_rows);
                live_rows = 0;
            } else {
                affected.push(1);
                live_rows += 1;
            }
        }

        state.call_count += 1;
        if !self.counting_only {
            state.calls.push(to_call());
        }

        // A failed call leaves the row count untouched, as a rolled-back
        // transaction would.
        if self.fail_on_call == Some(index) {
            return Err(Box::new(InjectedFailure { call: index }));
        }
        state.live_rows = live_rows;
        Ok(affected)
    }
}

#[async_trait]
impl TransactionalExecutor for RecordingExecutor {
    fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    async fn execute_single(&self, statement: &Statement) -> Result<i64, BoxError> {
        let affected = self.record(std::slice::from_ref(statement), || {
            ExecutorCall::Single(statement.clone())
        })?;
        Ok(affected.into_iter().sum())
    }

    async fn execute_batch(&self, statements: &[Statement]) -> Result<Vec<i64>, BoxError> {
        self.record(statements, || ExecutorCall::Batch(statements.to_vec()))
    }
}

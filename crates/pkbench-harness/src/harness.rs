//! Execution harness driving one benchmark run.

use crate::error::HarnessError;
use crate::execution_mode::ExecutionMode;
use crate::executor::TransactionalExecutor;
use crate::report::{BenchReport, TimingWindow};
use crate::request::BenchRequest;
use pkbench_generator::{
    Clock, EntropySource, Row, SequenceCounter, Statement, StatementBuilder, SystemClock,
    TableLayout,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Upper bound on the statement buffer preallocated for batch modes.
const BUILD_CAPACITY_HINT: u64 = 1024;

/// State owned by exactly one run.
struct RunContext {
    run_id: Uuid,
    builder: StatementBuilder,
    counter: SequenceCounter,
    execution_mode: ExecutionMode,
}

/// Output of one execution-mode loop, before cleanup.
struct Measurement {
    window: TimingWindow,
    construction: Option<Duration>,
    rows_affected: i64,
}

/// Drives row generation through a [`StatementBuilder`] and a
/// [`TransactionalExecutor`], timing the window each [`ExecutionMode`]
/// defines.
///
/// Runs are strictly sequential. Every run gets a fresh
/// [`SequenceCounter`], so rows of run `k` observe counter values
/// `1..=num` regardless of earlier runs on the same harness.
pub struct BenchHarness<'a, X: ?Sized, S = StdRng, C = SystemClock> {
    executor: &'a X,
    table: TableLayout,
    entropy: S,
    clock: C,
}

impl<'a, X> BenchHarness<'a, X>
where
    X: TransactionalExecutor + ?Sized,
{
    /// Create a harness using an OS-seeded CSPRNG and the system clock.
    pub fn new(executor: &'a X) -> Self {
        Self {
            executor,
            table: TableLayout::default(),
            entropy: StdRng::from_entropy(),
            clock: SystemClock,
        }
    }
}

impl<'a, X, S, C> BenchHarness<'a, X, S, C>
where
    X: TransactionalExecutor + ?Sized,
    S: EntropySource,
    C: Clock,
{
    /// Target a different table layout.
    pub fn with_table(mut self, table: TableLayout) -> Self {
        self.table = table;
        self
    }

    /// Replace the entropy source.
    pub fn with_entropy<S2: EntropySource>(self, entropy: S2) -> BenchHarness<'a, X, S2, C> {
        BenchHarness {
            executor: self.executor,
            table: self.table,
            entropy,
            clock: self.clock,
        }
    }

    /// Replace the wall clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> BenchHarness<'a, X, S, C2> {
        BenchHarness {
            executor: self.executor,
            table: self.table,
            entropy: self.entropy,
            clock,
        }
    }

    /// Run one benchmark.
    ///
    /// The first build or execute error aborts the run. A cleanup failure is
    /// returned as [`HarnessError::Cleanup`], which still carries the report.
    pub async fn run(&mut self, request: &BenchRequest) -> Result<BenchReport, HarnessError> {
        let mut ctx = RunContext {
            run_id: Uuid::new_v4(),
            builder: StatementBuilder::new(
                request.mode,
                self.table.clone(),
                self.executor.dialect(),
            ),
            counter: SequenceCounter::new(),
            execution_mode: request.execution_mode,
        };

        info!(
            run_id = %ctx.run_id,
            mode = %request.mode,
            execution_mode = %request.execution_mode,
            rows = request.num,
            dialect = %ctx.builder.dialect(),
            database_computed_key = request.mode.is_database_computed(),
            "Starting benchmark run"
        );

        let measurement = match request.execution_mode {
            ExecutionMode::Single => self.run_single(&mut ctx, request.num).await?,
            ExecutionMode::Batch => self.run_batch(&mut ctx, request.num).await?,
            ExecutionMode::BatchOnly => self.run_batch_only(&mut ctx, request.num).await?,
        };

        let mut report = BenchReport {
            run_id: ctx.run_id,
            mode: request.mode,
            execution_mode: request.execution_mode,
            rows: request.num,
            window: measurement.window,
            construction: measurement.construction,
            rows_affected: measurement.rows_affected,
            cleanup_rows: None,
        };

        info!(
            run_id = %ctx.run_id,
            rows = report.rows,
            elapsed_nanos = report.elapsed_nanos(),
            "term num:{} nanotime:{}",
            report.rows,
            report.elapsed_nanos()
        );

        if request.delete {
            let stmt = ctx.builder.delete_all();
            match self.executor.execute_single(&stmt).await {
                Ok(deleted) => {
                    info!(run_id = %ctx.run_id, deleted, "Cleanup complete");
                    report.cleanup_rows = Some(deleted);
                }
                Err(source) => {
                    return Err(HarnessError::Cleanup {
                        report: Box::new(report),
                        source,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Build and execute row by row; the window spans the whole loop.
    async fn run_single(
        &mut self,
        ctx: &mut RunContext,
        num: u64,
    ) -> Result<Measurement, HarnessError> {
        let mut rows_affected = 0;
        let window = TimingWindow::open();

        for row in 0..num {
            let stmt = self.build_row(ctx, row)?;
            let affected = self.executor.execute_single(&stmt).await.map_err(|source| {
                HarnessError::ExecuteRow {
                    row,
                    mode: ctx.builder.mode(),
                    execution_mode: ctx.execution_mode,
                    source,
                }
            })?;
            rows_affected += affected;
        }

        Ok(Measurement {
            window: window.close(),
            construction: None,
            rows_affected,
        })
    }

    /// Build everything, then time the batched execute alone. Construction
    /// time is measured too and reported next to the window.
    async fn run_batch(
        &mut self,
        ctx: &mut RunContext,
        num: u64,
    ) -> Result<Measurement, HarnessError> {
        let construction_start = Instant::now();
        let statements = self.build_all(ctx, num)?;
        let construction = construction_start.elapsed();

        let window = TimingWindow::open();
        let rows_affected = self.execute_batch(ctx, &statements).await?;

        Ok(Measurement {
            window: window.close(),
            construction: Some(construction),
            rows_affected,
        })
    }

    /// Build everything before the window opens; time the batched execute.
    async fn run_batch_only(
        &mut self,
        ctx: &mut RunContext,
        num: u64,
    ) -> Result<Measurement, HarnessError> {
        let statements = self.build_all(ctx, num)?;

        let window = TimingWindow::open();
        let rows_affected = self.execute_batch(ctx, &statements).await?;

        Ok(Measurement {
            window: window.close(),
            construction: None,
            rows_affected,
        })
    }

    async fn execute_batch(
        &self,
        ctx: &RunContext,
        statements: &[Statement],
    ) -> Result<i64, HarnessError> {
        if statements.is_empty() {
            return Ok(0);
        }
        let affected = self
            .executor
            .execute_batch(statements)
            .await
            .map_err(|source| HarnessError::ExecuteBatch {
                rows: statements.len() as u64,
                mode: ctx.builder.mode(),
                execution_mode: ctx.execution_mode,
                source,
            })?;
        Ok(affected.iter().sum())
    }

    fn build_all(&mut self, ctx: &mut RunContext, num: u64) -> Result<Vec<Statement>, HarnessError> {
        // Grows as rows are built; `num` is caller input and may be huge.
        let mut statements = Vec::with_capacity(num.min(BUILD_CAPACITY_HINT) as usize);
        for row in 0..num {
            statements.push(self.build_row(ctx, row)?);
        }
        Ok(statements)
    }

    /// Advance the counter to `row` and build its statement.
    fn build_row(&mut self, ctx: &mut RunContext, row: u64) -> Result<Statement, HarnessError> {
        let key_error = |source| HarnessError::KeyGeneration {
            row,
            mode: ctx.builder.mode(),
            source,
        };

        let sequence = ctx.counter.advance_to_row(row).map_err(key_error)?;
        let names = Row::random(&mut self.entropy);
        let stmt = ctx
            .builder
            .build(&names, &ctx.counter, &mut self.entropy, &self.clock)
            .map_err(key_error)?;

        debug!(run_id = %ctx.run_id, row, sequence, "Built statement");
        Ok(stmt)
    }
}

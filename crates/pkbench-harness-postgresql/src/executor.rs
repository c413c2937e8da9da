//! `TransactionalExecutor` backed by a PostgreSQL client.

use crate::error::PostgreSQLExecutorError;
use async_trait::async_trait;
use futures::future::try_join_all;
use pkbench_generator::{ParamValue, SqlDialect, Statement};
use pkbench_harness::{BoxError, TransactionalExecutor};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info};

/// Executor running each call in one read-write transaction.
pub struct PostgreSQLExecutor {
    client: Arc<Mutex<Client>>,
}

impl PostgreSQLExecutor {
    /// Connect and verify the connection with `SELECT 1`.
    pub async fn connect(connection_string: &str) -> Result<Self, PostgreSQLExecutorError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        client.simple_query("SELECT 1").await?;
        info!("Connected to PostgreSQL endpoint");

        Ok(Self {
            client: Arc::new(Mutex::new(client)),
        })
    }

}

#[async_trait]
impl TransactionalExecutor for PostgreSQLExecutor {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::PostgreSql
    }

    async fn execute_single(&self, statement: &Statement) -> Result<i64, BoxError> {
        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;
        let affected = tx.execute(statement.sql(), &bind_params(statement)).await?;
        tx.commit().await?;
        Ok(affected as i64)
    }

    /// All statements are sent on the open transaction without waiting for
    /// each reply, so the batch costs one pipelined submission plus commit.
    async fn execute_batch(&self, statements: &[Statement]) -> Result<Vec<i64>, BoxError> {
        let params: Vec<Vec<&(dyn ToSql + Sync)>> = statements.iter().map(bind_params).collect();

        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;

        let affected = try_join_all(
            statements
                .iter()
                .zip(&params)
                .map(|(stmt, params)| tx.execute(stmt.sql(), params)),
        )
        .await?;
        tx.commit().await?;

        debug!("Committed batch of {} statements", statements.len());
        Ok(affected.into_iter().map(|n| n as i64).collect())
    }
}

/// Parameters as `$1..$n` bindings, in statement order.
fn bind_params(statement: &Statement) -> Vec<&(dyn ToSql + Sync)> {
    statement
        .params()
        .iter()
        .map(|(_, value)| match value {
            ParamValue::Int64(v) => v as &(dyn ToSql + Sync),
            ParamValue::String(s) => s as &(dyn ToSql + Sync),
        })
        .collect()
}

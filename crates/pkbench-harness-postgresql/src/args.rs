//! CLI argument definitions for the Spanner target.

use crate::error::PostgreSQLExecutorError;
use clap::Args;

/// Where the benchmark connects.
#[derive(Args, Clone, Debug)]
pub struct SpannerTargetArgs {
    /// Google Cloud project id
    #[arg(long, env = "SPN_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Spanner instance id
    #[arg(long, env = "SPN_INSTANCE_ID")]
    pub instance_id: Option<String>,

    /// Spanner database id (also the PGAdapter database name)
    #[arg(long, env = "SPN_DATABASE_ID")]
    pub database_id: Option<String>,

    /// PGAdapter host
    #[arg(long, env = "PGADAPTER_HOST", default_value = "localhost")]
    pub pgadapter_host: String,

    /// PGAdapter port
    #[arg(long, env = "PGADAPTER_PORT", default_value = "5432")]
    pub pgadapter_port: u16,

    /// Full connection string; overrides host, port and database id
    #[arg(long, env = "SPN_CONNECTION_STRING")]
    pub connection_string: Option<String>,
}

impl SpannerTargetArgs {
    /// Fully-qualified database name, when project, instance and database are all set.
    pub fn database_name(&self) -> Option<String> {
        match (&self.project_id, &self.instance_id, &self.database_id) {
            (Some(p), Some(i), Some(d)) => {
                Some(format!("projects/{p}/instances/{i}/databases/{d}"))
            }
            _ => None,
        }
    }

    /// Connection string for `tokio_postgres::connect`.
    pub fn connection_string(&self) -> Result<String, PostgreSQLExecutorError> {
        if let Some(conn) = &self.connection_string {
            return Ok(conn.clone());
        }
        let database = self.database_id.as_deref().ok_or_else(|| {
            PostgreSQLExecutorError::Config(
                "either --connection-string or --database-id (SPN_DATABASE_ID) is required"
                    .to_string(),
            )
        })?;
        Ok(format!(
            "host={} port={} dbname={}",
            self.pgadapter_host, self.pgadapter_port, database
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SpannerTargetArgs {
        SpannerTargetArgs {
            project_id: Some("proj".to_string()),
            instance_id: Some("inst".to_string()),
            database_id: Some("db".to_string()),
            pgadapter_host: "localhost".to_string(),
            pgadapter_port: 5432,
            connection_string: None,
        }
    }

    #[test]
    fn test_database_name() {
        assert_eq!(
            args().database_name().unwrap(),
            "projects/proj/instances/inst/databases/db"
        );

        let mut partial = args();
        partial.instance_id = None;
        assert!(partial.database_name().is_none());
    }

    #[test]
    fn test_connection_string_from_parts() {
        assert_eq!(
            args().connection_string().unwrap(),
            "host=localhost port=5432 dbname=db"
        );
    }

    #[test]
    fn test_connection_string_override() {
        let mut a = args();
        a.connection_string = Some("postgresql://u:p@h:1/x".to_string());
        assert_eq!(a.connection_string().unwrap(), "postgresql://u:p@h:1/x");
    }

    #[test]
    fn test_connection_string_requires_database() {
        let mut a = args();
        a.database_id = None;
        assert!(matches!(
            a.connection_string(),
            Err(PostgreSQLExecutorError::Config(_))
        ));
    }
}

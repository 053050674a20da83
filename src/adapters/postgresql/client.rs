//! PostgreSQL client implementation
//!
//! Owns the connection pool for the report table. The sink runs one
//! transaction at a time, so the pool holds a single connection.

use crate::config::SinkConfig;
use crate::domain::{Result, SyncError};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::Host;
use tokio_postgres::NoTls;

const POOL_SIZE: usize = 1;

/// PostgreSQL client for the report table
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Host and database, for logs
    description: String,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// The connection string carries host, port and database; user and
    /// password come from their own settings and override anything in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the pool
    /// cannot be built. No connection is opened yet.
    pub fn new(config: &SinkConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config = config.dsn.parse().map_err(|e| {
            SyncError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
        })?;
        pg_config.user(&config.user);
        pg_config.password(config.password.expose_secret().as_str());
        if let Some(seconds) = config.connection_timeout_seconds {
            pg_config.connect_timeout(Duration::from_secs(seconds));
        }

        let description = describe_config(&pg_config);

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let mut builder = Pool::builder(manager).max_size(POOL_SIZE);
        if let Some(seconds) = config.connection_timeout_seconds {
            let timeout = Some(Duration::from_secs(seconds));
            builder = builder
                .runtime(Runtime::Tokio1)
                .wait_timeout(timeout)
                .create_timeout(timeout);
        }
        let pool = builder.build().map_err(|e| {
            SyncError::Configuration(format!("Failed to create connection pool: {e}"))
        })?;

        Ok(Self { pool, description })
    }

    /// Test the connection to PostgreSQL
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be opened or `SELECT 1` fails.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| SyncError::Database(format!("Connection test failed: {e}")))?;

        tracing::info!(sink = %self.description, "PostgreSQL connection test successful");
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Connection`] if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            SyncError::Connection(format!(
                "Failed to connect to {}: {e}",
                self.description
            ))
        })
    }

    /// Host and database name, without credentials
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Describe a parsed connection config without its credentials
fn describe_config(config: &tokio_postgres::Config) -> String {
    let hosts: Vec<String> = config
        .get_hosts()
        .iter()
        .map(|host| match host {
            Host::Tcp(name) => name.clone(),
            #[cfg(unix)]
            Host::Unix(path) => path.display().to_string(),
        })
        .collect();

    let hosts = if hosts.is_empty() {
        "localhost".to_string()
    } else {
        hosts.join(",")
    };

    match config.get_dbname() {
        Some(dbname) => format!("postgresql://{hosts}/{dbname}"),
        None => format!("postgresql://{hosts}"),
    }
}

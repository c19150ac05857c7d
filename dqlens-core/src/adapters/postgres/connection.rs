//! PostgreSQL connection pool management and validation.
//!
//! Every pooled session is configured through `after_connect`, so the
//! read-only and timeout settings hold for all connections, not just the
//! first one.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use url::Url;

use crate::error::{DqLensError, Result, redact_database_url};

use super::PostgresClient;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

impl PostgresClient {
    /// Creates a client with a lazy connection pool.
    ///
    /// Sessions are read-only (`default_transaction_read_only = on`) with a
    /// statement timeout, and carry an application name for tracking.
    ///
    /// # Errors
    /// Returns `DqLensError::Configuration` for a malformed URL and
    /// `DqLensError::Connection` when pool creation fails. Credentials are
    /// sanitized in all error messages.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        use sqlx::Executor;

        Self::validate_connection_string(connection_string)?;

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .min_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .test_before_acquire(true)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute("SET statement_timeout = '30s'").await?;
                    conn.execute("SET default_transaction_read_only = on")
                        .await?;
                    let app_name = format!("dqlens-{}", env!("CARGO_PKG_VERSION"));
                    conn.execute(format!("SET application_name = '{}'", app_name).as_str())
                        .await?;
                    Ok(())
                })
            })
            .connect_lazy(connection_string)
            .map_err(|e| DqLensError::Connection {
                context: format!(
                    "Failed to create connection pool to {}",
                    redact_database_url(connection_string)
                ),
                source: Box::new(e),
            })?;

        tracing::debug!(
            url = %redact_database_url(connection_string),
            "PostgreSQL connection pool created"
        );

        Ok(Self { pool })
    }

    /// Verifies the pool can reach the server.
    ///
    /// # Errors
    /// Returns `DqLensError::Connection` when the probe query fails.
    pub(crate) async fn probe_connection(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(DqLensError::connection_failed)?;
        Ok(())
    }

    /// Closes the connection pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Validates connection string scheme and host before pool creation.
    fn validate_connection_string(connection_string: &str) -> Result<()> {
        let url = Url::parse(connection_string).map_err(|e| {
            DqLensError::configuration(format!(
                "Invalid PostgreSQL connection string format: {}",
                e
            ))
        })?;

        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(DqLensError::configuration(
                "Connection string must use postgres:// or postgresql:// scheme",
            ));
        }

        if url.host_str().is_none() {
            return Err(DqLensError::configuration(
                "Connection string must specify a host",
            ));
        }

        Ok(())
    }
}

//! PostgreSQL warehouse backend.
//!
//! Read-only by construction: every session sets
//! `default_transaction_read_only = on` and a statement timeout at connect
//! time. Metadata comes from `information_schema`; aggregates run as
//! single-value `COUNT` queries with validated, quoted identifiers.
//!
//! # Module Structure
//! - `connection`: pool setup, URL validation, session configuration
//! - `metadata`: schema, table, and column listing
//! - `aggregates`: count queries and row sampling

mod aggregates;
mod connection;
mod metadata;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{ColumnMeta, TableRef, TableSample};

use super::WarehouseClient;

/// PostgreSQL-backed [`WarehouseClient`] over a lazy connection pool.
#[derive(Debug)]
pub struct PostgresClient {
    pub(crate) pool: PgPool,
}

#[async_trait]
impl WarehouseClient for PostgresClient {
    async fn test_connection(&self) -> Result<()> {
        self.probe_connection().await
    }

    async fn list_schemas(&self) -> Result<Vec<String>> {
        self.collect_schemas().await
    }

    async fn list_tables(&self, schemas: &[String]) -> Result<Vec<TableRef>> {
        self.collect_tables(schemas).await
    }

    async fn list_columns(&self, table: &TableRef) -> Result<Vec<ColumnMeta>> {
        self.collect_columns(table).await
    }

    async fn sample_rows(&self, table: &TableRef, limit: u32) -> Result<TableSample> {
        self.fetch_sample(table, limit).await
    }

    async fn count_rows(&self, table: &TableRef) -> Result<u64> {
        self.aggregate_count_rows(table).await
    }

    async fn count_non_null(&self, table: &TableRef, column: &str) -> Result<u64> {
        self.aggregate_count_non_null(table, column).await
    }

    async fn count_distinct_non_null(&self, table: &TableRef, column: &str) -> Result<u64> {
        self.aggregate_count_distinct(table, column).await
    }

    async fn count_matching(&self, table: &TableRef, column: &str, pattern: &str) -> Result<u64> {
        self.aggregate_count_matching(table, column, pattern).await
    }
}

//! Aggregate count queries and row sampling.
//!
//! Identifiers cannot be bound as parameters, so every interpolated
//! schema, table, and column name goes through `validate_identifier` and
//! `quote_ident` first. Patterns are always bound, never interpolated.

use sqlx::Row;

use crate::error::{DqLensError, Result};
use crate::models::{TableRef, TableSample};
use crate::validation::{quote_ident, validate_identifier};

use super::PostgresClient;

/// Builds the quoted `"schema"."table"` form after validating both parts.
fn qualified_table(table: &TableRef) -> Result<String> {
    validate_identifier(&table.schema)?;
    validate_identifier(&table.name)?;
    Ok(format!(
        "{}.{}",
        quote_ident(&table.schema),
        quote_ident(&table.name)
    ))
}

/// Validates and quotes a column name for interpolation.
fn quoted_column(column: &str) -> Result<String> {
    validate_identifier(column)?;
    Ok(quote_ident(column))
}

impl PostgresClient {
    /// Total row count.
    pub(crate) async fn aggregate_count_rows(&self, table: &TableRef) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", qualified_table(table)?);
        self.fetch_count(&sql, table, None).await
    }

    /// Non-null count for one column.
    pub(crate) async fn aggregate_count_non_null(
        &self,
        table: &TableRef,
        column: &str,
    ) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT({}) FROM {}",
            quoted_column(column)?,
            qualified_table(table)?
        );
        self.fetch_count(&sql, table, Some(column)).await
    }

    /// Distinct non-null count for one column.
    pub(crate) async fn aggregate_count_distinct(
        &self,
        table: &TableRef,
        column: &str,
    ) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(DISTINCT {}) FROM {}",
            quoted_column(column)?,
            qualified_table(table)?
        );
        self.fetch_count(&sql, table, Some(column)).await
    }

    /// Count of rows whose value matches the bound regular expression.
    ///
    /// The null guard is explicit: a null value must count as not matching,
    /// not as an unknown three-valued result.
    pub(crate) async fn aggregate_count_matching(
        &self,
        table: &TableRef,
        column: &str,
        pattern: &str,
    ) -> Result<u64> {
        let quoted = quoted_column(column)?;
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} IS NOT NULL AND {}::text ~ $1",
            qualified_table(table)?,
            quoted,
            quoted
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DqLensError::conformity_check(
                    format!(
                        "Pattern query failed for column {} in {}",
                        column,
                        table.full_name()
                    ),
                    e,
                )
            })?;

        Ok(count.max(0) as u64)
    }

    /// Fetches a row-limited `SELECT *` sample as JSON objects.
    ///
    /// Column names come from the first sampled row; an empty sample falls
    /// back to declared metadata so the column set survives empty tables.
    pub(crate) async fn fetch_sample(&self, table: &TableRef, limit: u32) -> Result<TableSample> {
        let sql = format!(
            "SELECT row_to_json(t.*) AS row_data FROM {} t LIMIT $1",
            qualified_table(table)?
        );

        let raw_rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DqLensError::sample_fetch(
                    format!("Sample query failed for {}", table.full_name()),
                    e,
                )
            })?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        for raw in raw_rows {
            let value: serde_json::Value = raw.try_get("row_data").map_err(|e| {
                DqLensError::sample_fetch(
                    format!("Failed to decode sampled row from {}", table.full_name()),
                    e,
                )
            })?;
            rows.push(value);
        }

        let columns = match rows.first() {
            Some(serde_json::Value::Object(first)) => first.keys().cloned().collect(),
            _ => self
                .collect_columns(table)
                .await?
                .into_iter()
                .map(|c| c.name)
                .collect(),
        };

        tracing::debug!(
            table = %table.full_name(),
            rows = rows.len(),
            "Fetched sample"
        );

        Ok(TableSample { columns, rows })
    }

    async fn fetch_count(
        &self,
        sql: &str,
        table: &TableRef,
        column: Option<&str>,
    ) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let context = match column {
                    Some(column) => format!(
                        "Aggregate query failed for column {} in {}",
                        column,
                        table.full_name()
                    ),
                    None => format!("Row count failed for {}", table.full_name()),
                };
                DqLensError::score_computation(context, e)
            })?;

        Ok(count.max(0) as u64)
    }
}

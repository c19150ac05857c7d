//! Schema, table, and column metadata collection via `information_schema`.

use sqlx::Row;

use crate::error::{DqLensError, Result};
use crate::models::{ColumnMeta, TableRef};

use super::PostgresClient;

impl PostgresClient {
    /// Lists non-system schemas in name order.
    pub(crate) async fn collect_schemas(&self) -> Result<Vec<String>> {
        let schemas: Vec<String> = sqlx::query_scalar(
            r"
            SELECT schema_name
            FROM information_schema.schemata
            WHERE schema_name NOT IN ('information_schema', 'pg_catalog', 'pg_toast')
            ORDER BY schema_name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DqLensError::metadata_fetch("Failed to list schemas", e))?;

        tracing::debug!(count = schemas.len(), "Collected schemas");
        Ok(schemas)
    }

    /// Lists base tables in the given schemas, ordered by schema then name.
    pub(crate) async fn collect_tables(&self, schemas: &[String]) -> Result<Vec<TableRef>> {
        let rows = sqlx::query(
            r"
            SELECT table_schema, table_name
            FROM information_schema.tables
            WHERE table_schema = ANY($1)
              AND table_type = 'BASE TABLE'
            ORDER BY table_schema, table_name
            ",
        )
        .bind(schemas)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DqLensError::metadata_fetch("Failed to list tables", e))?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let schema: String = row
                .try_get("table_schema")
                .map_err(|e| DqLensError::metadata_fetch("Failed to read table_schema", e))?;
            let name: String = row
                .try_get("table_name")
                .map_err(|e| DqLensError::metadata_fetch("Failed to read table_name", e))?;
            tables.push(TableRef::new(schema, name));
        }

        tracing::debug!(count = tables.len(), "Collected tables");
        Ok(tables)
    }

    /// Lists a table's columns in declaration order.
    ///
    /// An empty result is not an error; tables with no visible columns
    /// simply contribute nothing to the score.
    pub(crate) async fn collect_columns(&self, table: &TableRef) -> Result<Vec<ColumnMeta>> {
        let rows = sqlx::query(
            r"
            SELECT column_name, data_type
            FROM information_schema.columns
            WHERE table_schema = $1
              AND table_name = $2
            ORDER BY ordinal_position
            ",
        )
        .bind(&table.schema)
        .bind(&table.name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DqLensError::metadata_fetch(
                format!("Failed to list columns for {}", table.full_name()),
                e,
            )
        })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row
                .try_get("column_name")
                .map_err(|e| DqLensError::metadata_fetch("Failed to read column_name", e))?;
            let data_type: String = row
                .try_get("data_type")
                .map_err(|e| DqLensError::metadata_fetch("Failed to read data_type", e))?;
            columns.push(ColumnMeta::new(name, data_type));
        }

        Ok(columns)
    }
}

//! In-memory warehouse backend over JSON row fixtures.
//!
//! Serves tests and demos without a live database. Tables are JSON object
//! rows keyed by column name; aggregates iterate the rows with the same
//! null and pattern semantics the SQL backends implement server-side.
//! Failure injection makes the per-unit degradation paths reachable from
//! deterministic tests.

use std::collections::HashSet;

use async_trait::async_trait;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::error::{DqLensError, Result};
use crate::models::{ColumnMeta, TableRef, TableSample};

use super::WarehouseClient;

/// One fixture table: declared columns plus JSON object rows.
#[derive(Debug, Clone)]
struct MemoryTable {
    table: TableRef,
    columns: Vec<ColumnMeta>,
    rows: Vec<Value>,
}

/// Fixture-backed [`WarehouseClient`].
///
/// Built with the `with_*` constructors; `fail_*` markers force the named
/// operation to return an injected error so degraded paths can be tested.
#[derive(Debug, Default)]
pub struct MemoryClient {
    tables: IndexMap<String, MemoryTable>,
    fail_metadata: HashSet<String>,
    fail_sampling: HashSet<String>,
    fail_counts: HashSet<String>,
    fail_matching: HashSet<String>,
}

impl MemoryClient {
    /// Creates an empty client with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fixture table with declared columns and JSON object rows.
    #[must_use]
    pub fn with_table(mut self, table: TableRef, columns: Vec<ColumnMeta>, rows: Vec<Value>) -> Self {
        let key = table.full_name();
        self.tables.insert(
            key,
            MemoryTable {
                table,
                columns,
                rows,
            },
        );
        self
    }

    /// Forces `list_columns` for the named table to fail.
    #[must_use]
    pub fn fail_metadata_for(mut self, full_name: &str) -> Self {
        self.fail_metadata.insert(full_name.to_string());
        self
    }

    /// Forces `sample_rows` for the named table to fail.
    #[must_use]
    pub fn fail_sampling_for(mut self, full_name: &str) -> Self {
        self.fail_sampling.insert(full_name.to_string());
        self
    }

    /// Forces the count aggregates for `full_name.column` to fail.
    #[must_use]
    pub fn fail_counts_for(mut self, full_name: &str, column: &str) -> Self {
        self.fail_counts.insert(format!("{full_name}.{column}"));
        self
    }

    /// Forces `count_matching` for `full_name.column` to fail.
    #[must_use]
    pub fn fail_matching_for(mut self, full_name: &str, column: &str) -> Self {
        self.fail_matching.insert(format!("{full_name}.{column}"));
        self
    }

    fn table(&self, table: &TableRef) -> Result<&MemoryTable> {
        self.tables.get(&table.full_name()).ok_or_else(|| {
            DqLensError::metadata_fetch(
                format!("table {} not found in fixture", table.full_name()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such table"),
            )
        })
    }

    fn injected(context: &str) -> DqLensError {
        DqLensError::score_computation(
            context.to_string(),
            std::io::Error::other("injected failure"),
        )
    }

    /// Value of `column` in `row`, with null and absent folded together.
    fn cell<'a>(row: &'a Value, column: &str) -> Option<&'a Value> {
        match row.get(column) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Text rendering used for distinctness and pattern matching. Strings
    /// are taken raw; other scalars use their JSON rendering.
    fn cell_text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl WarehouseClient for MemoryClient {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn list_schemas(&self) -> Result<Vec<String>> {
        let mut schemas: Vec<String> = Vec::new();
        for entry in self.tables.values() {
            if !schemas.contains(&entry.table.schema) {
                schemas.push(entry.table.schema.clone());
            }
        }
        Ok(schemas)
    }

    async fn list_tables(&self, schemas: &[String]) -> Result<Vec<TableRef>> {
        Ok(self
            .tables
            .values()
            .filter(|entry| schemas.contains(&entry.table.schema))
            .map(|entry| entry.table.clone())
            .collect())
    }

    async fn list_columns(&self, table: &TableRef) -> Result<Vec<ColumnMeta>> {
        if self.fail_metadata.contains(&table.full_name()) {
            return Err(DqLensError::metadata_fetch(
                format!("metadata lookup for {}", table.full_name()),
                std::io::Error::other("injected failure"),
            ));
        }
        Ok(self.table(table)?.columns.clone())
    }

    async fn sample_rows(&self, table: &TableRef, limit: u32) -> Result<TableSample> {
        if self.fail_sampling.contains(&table.full_name()) {
            return Err(DqLensError::sample_fetch(
                format!("sampling {}", table.full_name()),
                std::io::Error::other("injected failure"),
            ));
        }
        let entry = self.table(table)?;
        let rows: Vec<Value> = entry.rows.iter().take(limit as usize).cloned().collect();
        // A sample of an empty table still carries the column set, like a
        // result-set description would
        let columns = match rows.first() {
            Some(Value::Object(first)) => first.keys().cloned().collect(),
            _ => entry.columns.iter().map(|c| c.name.clone()).collect(),
        };
        Ok(TableSample { columns, rows })
    }

    async fn count_rows(&self, table: &TableRef) -> Result<u64> {
        Ok(self.table(table)?.rows.len() as u64)
    }

    async fn count_non_null(&self, table: &TableRef, column: &str) -> Result<u64> {
        if self
            .fail_counts
            .contains(&format!("{}.{column}", table.full_name()))
        {
            return Err(Self::injected(column));
        }
        let entry = self.table(table)?;
        Ok(entry
            .rows
            .iter()
            .filter(|row| Self::cell(row, column).is_some())
            .count() as u64)
    }

    async fn count_distinct_non_null(&self, table: &TableRef, column: &str) -> Result<u64> {
        if self
            .fail_counts
            .contains(&format!("{}.{column}", table.full_name()))
        {
            return Err(Self::injected(column));
        }
        let entry = self.table(table)?;
        let distinct: HashSet<String> = entry
            .rows
            .iter()
            .filter_map(|row| Self::cell(row, column))
            .map(Self::cell_text)
            .collect();
        Ok(distinct.len() as u64)
    }

    async fn count_matching(&self, table: &TableRef, column: &str, pattern: &str) -> Result<u64> {
        if self
            .fail_matching
            .contains(&format!("{}.{column}", table.full_name()))
        {
            return Err(DqLensError::conformity_check(
                format!("pattern match on {column}"),
                std::io::Error::other("injected failure"),
            ));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| DqLensError::conformity_check(format!("compiling pattern for {column}"), e))?;
        let entry = self.table(table)?;
        Ok(entry
            .rows
            .iter()
            .filter_map(|row| Self::cell(row, column))
            .filter(|value| regex.is_match(&Self::cell_text(value)))
            .count() as u64)
    }
}

//! Report data model for quality analysis.
//!
//! All entities are constructed fresh per analysis run, held in memory for
//! the duration of rendering, and discarded. Metrics expose names, counts,
//! and ratios only, never sampled data values.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::SemanticType;
use crate::error::{DqLensError, Result};
use crate::scoring::maturity_score;

/// A `schema.table` reference in the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    /// Schema name
    pub schema: String,
    /// Table name
    pub name: String,
}

impl TableRef {
    /// Creates a table reference from parts.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Parses a `schema.table` string.
    ///
    /// # Errors
    /// Returns `DqLensError::Validation` when the input does not split into
    /// exactly a non-empty schema and a non-empty table name.
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split_once('.') {
            Some((schema, name))
                if !schema.is_empty() && !name.is_empty() && !name.contains('.') =>
            {
                Ok(Self::new(schema, name))
            }
            _ => Err(DqLensError::validation(format!(
                "Invalid table name format: {}",
                full_name
            ))),
        }
    }

    /// Returns the `schema.table` form used as report keys.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// Column name and declared type as listed by the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name
    pub name: String,
    /// Declared (warehouse) data type, e.g. `character varying`
    pub declared_type: String,
}

impl ColumnMeta {
    /// Creates column metadata from parts.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A column within a specific table, sourced once from metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Schema name
    pub schema: String,
    /// Table name
    pub table: String,
    /// Column name
    pub name: String,
    /// Declared (warehouse) data type; empty when the column was discovered
    /// only through sampling
    pub declared_type: String,
}

impl ColumnDescriptor {
    /// Creates a descriptor for a column of the given table.
    pub fn new(table: &TableRef, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            schema: table.schema.clone(),
            table: table.name.clone(),
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A row-limited data sample with named columns.
///
/// The column list is the sample's own view of the table (`SELECT *`) and
/// may legitimately differ from declared metadata, e.g. computed columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSample {
    /// Column names as seen by the sample query
    pub columns: Vec<String>,
    /// Sampled rows as JSON objects keyed by column name
    pub rows: Vec<serde_json::Value>,
}

/// Per-column quality scores, each a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    /// Percentage of non-null values
    pub completeness: f64,
    /// Percentage of non-null values that are distinct
    pub uniqueness: f64,
    /// Percentage of rows matching the type-specific format pattern
    pub conformity: f64,
}

impl QualityScores {
    /// Neutral scores substituted when a column's aggregate queries fail:
    /// treated as "no issue" so a single column never aborts the run.
    pub const NEUTRAL: Self = Self {
        completeness: 100.0,
        uniqueness: 100.0,
        conformity: 100.0,
    };
}

/// Issue kinds detectable on a column. Fixed thresholds, fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnIssue {
    /// Completeness below 90%
    LowCompleteness,
    /// Uniqueness below 100%
    DuplicatesPresent,
    /// Conformity below 90%
    LowConformity,
}

impl ColumnIssue {
    /// Human-readable label used in rendered reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowCompleteness => "Low completeness",
            Self::DuplicatesPresent => "Duplicates present",
            Self::LowConformity => "Low conformity",
        }
    }
}

impl std::fmt::Display for ColumnIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column with at least one detected issue.
///
/// Only built when the issue set is non-empty; clean columns do not appear
/// in table summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnFinding {
    /// The column this finding describes
    pub column: ColumnDescriptor,
    /// Classified semantic type
    pub semantic_type: SemanticType,
    /// Measured scores
    pub scores: QualityScores,
    /// Detected issues in fixed order
    pub issues: Vec<ColumnIssue>,
    /// Remediation hints in fixed order
    pub recommendations: Vec<String>,
}

/// Per-table drill-down detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    /// `schema.table`
    pub full_name: String,
    /// Number of columns the table declares in metadata
    pub total_columns: u64,
    /// Columns with issues, in analysis order
    pub findings: Vec<ColumnFinding>,
}

impl TableSummary {
    /// True when no column of this table raised an issue.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaturityReport {
    /// Number of tables selected for analysis (including skipped ones)
    pub total_tables: u64,
    /// Columns accumulated across successfully processed tables
    pub total_columns: u64,
    /// Columns with at least one issue (not issue instances)
    pub total_issues: u64,
    /// Maturity score: percentage of columns with no detected issue
    pub score: f64,
    /// Per-table summaries keyed by `schema.table`, in analysis order
    pub table_summaries: IndexMap<String, TableSummary>,
    /// Per-unit-of-work notices for skipped tables and degraded columns
    pub warnings: Vec<String>,
    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
}

impl MaturityReport {
    /// Builds the final report, computing the maturity score from the
    /// accumulated column and issue counts.
    pub fn new(
        total_tables: u64,
        total_columns: u64,
        total_issues: u64,
        table_summaries: IndexMap<String, TableSummary>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            total_tables,
            total_columns,
            total_issues,
            score: maturity_score(total_columns, total_issues),
            table_summaries,
            warnings,
            analyzed_at: Utc::now(),
        }
    }

    /// True when every analyzed column is issue-free.
    pub fn is_perfect(&self) -> bool {
        self.total_issues == 0
    }
}

//! Core library for dqlens, a data-quality maturity scorer for SQL
//! warehouses.
//!
//! One analysis run classifies columns by name, measures completeness,
//! uniqueness, and format conformity with read-only aggregate queries,
//! derives issues against fixed thresholds, and rolls everything up into a
//! single [`MaturityReport`] with a 0-100 maturity score.
//!
//! # Module Structure
//! - `adapters`: warehouse client trait plus backends (postgres, memory)
//! - `analyze`: per-table, per-column orchestration with graceful
//!   degradation
//! - `classify`: column-name semantic type classifier
//! - `scoring`: pure ratio arithmetic
//! - `recommend`: issue detection and remediation hints
//! - `models`: report data model
//! - `error`: run-scoped error taxonomy with credential redaction
//! - `validation`: identifier validation for interpolated SQL
//! - `logging`: tracing subscriber setup

pub mod adapters;
pub mod analyze;
pub mod classify;
pub mod error;
pub mod logging;
pub mod models;
pub mod recommend;
pub mod scoring;
pub mod validation;

pub use adapters::{MemoryClient, WarehouseClient, create_client};
pub use analyze::{Analyzer, SamplingOptions};
pub use classify::SemanticType;
pub use error::{DqLensError, Result, redact_database_url};
pub use logging::init_logging;
pub use models::{
    ColumnDescriptor, ColumnFinding, ColumnIssue, ColumnMeta, MaturityReport, QualityScores,
    TableRef, TableSample, TableSummary,
};
pub use recommend::{detect_issues, recommend};

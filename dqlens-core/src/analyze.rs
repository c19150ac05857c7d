//! Analysis orchestration: drives the per-table, per-column scoring run.
//!
//! The run is never aborted by a unit failure. Failed metadata skips the
//! table, failed sampling falls back to declared columns, failed aggregates
//! substitute neutral scores, and every degradation is recorded in the
//! report's warning list. `analyze` itself is infallible.

use indexmap::IndexMap;

use crate::adapters::WarehouseClient;
use crate::classify::SemanticType;
use crate::error::DqLensError;
use crate::models::{
    ColumnDescriptor, ColumnFinding, ColumnMeta, MaturityReport, QualityScores, TableRef,
    TableSummary,
};
use crate::recommend::{detect_issues, recommend};
use crate::scoring::{completeness_ratio, conformity_ratio, uniqueness_ratio};

/// Row sampling configuration. Disabled by default; when enabled the
/// working column set comes from a row-limited `SELECT *` sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplingOptions {
    /// Whether to sample rows for column discovery
    pub enabled: bool,
    /// Maximum rows to fetch per table when enabled
    pub row_limit: u32,
}

impl SamplingOptions {
    /// Sampling turned off; columns come from metadata alone.
    pub const DISABLED: Self = Self {
        enabled: false,
        row_limit: 0,
    };

    /// Sampling turned on with the given per-table row limit.
    pub fn with_limit(row_limit: u32) -> Self {
        Self {
            enabled: true,
            row_limit,
        }
    }
}

/// Drives a full analysis run against one warehouse client.
pub struct Analyzer<'a> {
    client: &'a dyn WarehouseClient,
    sampling: SamplingOptions,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer with sampling disabled.
    pub fn new(client: &'a dyn WarehouseClient) -> Self {
        Self {
            client,
            sampling: SamplingOptions::DISABLED,
        }
    }

    /// Sets the sampling configuration.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }

    /// Analyzes tables given as `schema.table` strings.
    ///
    /// Unparseable entries are skipped with a warning but still count
    /// toward `total_tables`, like any other skipped table.
    pub async fn analyze_named(&self, names: &[String]) -> MaturityReport {
        let mut tables = Vec::with_capacity(names.len());
        let mut parse_warnings = Vec::new();
        for name in names {
            match TableRef::parse(name) {
                Ok(table) => tables.push(table),
                Err(e) => {
                    tracing::warn!(entry = %name, "Skipping unparseable table entry");
                    parse_warnings.push(e.to_string());
                }
            }
        }

        let mut report = self.analyze(&tables).await;
        report.total_tables = names.len() as u64;
        parse_warnings.append(&mut report.warnings);
        report.warnings = parse_warnings;
        report
    }

    /// Analyzes the given tables and builds the maturity report.
    pub async fn analyze(&self, tables: &[TableRef]) -> MaturityReport {
        let mut total_columns: u64 = 0;
        let mut total_issues: u64 = 0;
        let mut summaries: IndexMap<String, TableSummary> = IndexMap::new();
        let mut warnings: Vec<String> = Vec::new();

        for table in tables {
            let metadata = match self.client.list_columns(table).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(table = %table, error = %e, "Skipping table");
                    warnings.push(format!("Skipped table {}: {}", table, e));
                    continue;
                }
            };

            total_columns += metadata.len() as u64;

            let working_columns = self.working_columns(table, &metadata, &mut warnings).await;

            let mut findings = Vec::new();
            for column in working_columns {
                let semantic_type = SemanticType::classify(&column.name);
                let scores = self.score_column(table, &column, semantic_type, &mut warnings).await;
                let issues = detect_issues(&scores);
                if issues.is_empty() {
                    continue;
                }
                total_issues += 1;
                let recommendations =
                    recommend(scores.completeness, scores.uniqueness, scores.conformity);
                findings.push(ColumnFinding {
                    column,
                    semantic_type,
                    scores,
                    issues,
                    recommendations,
                });
            }

            let full_name = table.full_name();
            tracing::debug!(
                table = %full_name,
                columns = metadata.len(),
                findings = findings.len(),
                "Analyzed table"
            );
            summaries.insert(
                full_name.clone(),
                TableSummary {
                    full_name,
                    total_columns: metadata.len() as u64,
                    findings,
                },
            );
        }

        MaturityReport::new(
            tables.len() as u64,
            total_columns,
            total_issues,
            summaries,
            warnings,
        )
    }

    /// Resolves the columns actually scored for a table.
    ///
    /// With sampling enabled the sample's column set wins (it reflects what
    /// `SELECT *` sees); a failed sample degrades to declared metadata.
    async fn working_columns(
        &self,
        table: &TableRef,
        metadata: &[ColumnMeta],
        warnings: &mut Vec<String>,
    ) -> Vec<ColumnDescriptor> {
        if self.sampling.enabled && self.sampling.row_limit > 0 {
            match self.client.sample_rows(table, self.sampling.row_limit).await {
                Ok(sample) => {
                    return sample
                        .columns
                        .iter()
                        .map(|name| {
                            let declared_type = metadata
                                .iter()
                                .find(|c| c.name == *name)
                                .map_or("", |c| c.declared_type.as_str());
                            ColumnDescriptor::new(table, name, declared_type)
                        })
                        .collect();
                }
                Err(e) => {
                    tracing::warn!(table = %table, error = %e, "Sampling failed, using declared columns");
                    warnings.push(format!(
                        "Sampling failed for table {}, falling back to declared columns: {}",
                        table, e
                    ));
                }
            }
        }

        metadata
            .iter()
            .map(|c| ColumnDescriptor::new(table, &c.name, &c.declared_type))
            .collect()
    }

    /// Scores one column, substituting neutral defaults on failure.
    ///
    /// A failed completeness/uniqueness fetch does not suppress the
    /// conformity check; each axis degrades independently.
    async fn score_column(
        &self,
        table: &TableRef,
        column: &ColumnDescriptor,
        semantic_type: SemanticType,
        warnings: &mut Vec<String>,
    ) -> QualityScores {
        let (completeness, uniqueness) = match self.base_scores(table, &column.name).await {
            Ok(scores) => scores,
            Err(e) => {
                tracing::warn!(
                    table = %table,
                    column = %column.name,
                    error = %e,
                    "Score computation failed, using neutral defaults"
                );
                warnings.push(format!(
                    "Score computation failed for column {} in {}: {}",
                    column.name, table, e
                ));
                (QualityScores::NEUTRAL.completeness, QualityScores::NEUTRAL.uniqueness)
            }
        };

        let conformity = match semantic_type.pattern() {
            None => QualityScores::NEUTRAL.conformity,
            Some(pattern) => match self.conformity_score(table, &column.name, pattern).await {
                Ok(score) => score,
                Err(e) => {
                    tracing::warn!(
                        table = %table,
                        column = %column.name,
                        error = %e,
                        "Conformity check failed, assuming conformant"
                    );
                    warnings.push(format!(
                        "Conformity check failed for column {} in {}: {}",
                        column.name, table, e
                    ));
                    QualityScores::NEUTRAL.conformity
                }
            },
        };

        QualityScores {
            completeness,
            uniqueness,
            conformity,
        }
    }

    async fn base_scores(
        &self,
        table: &TableRef,
        column: &str,
    ) -> Result<(f64, f64), DqLensError> {
        let total = self.client.count_rows(table).await?;
        let non_null = self.client.count_non_null(table, column).await?;
        let distinct = self.client.count_distinct_non_null(table, column).await?;

        Ok((
            completeness_ratio(non_null, total),
            uniqueness_ratio(distinct, non_null, total),
        ))
    }

    async fn conformity_score(
        &self,
        table: &TableRef,
        column: &str,
        pattern: &str,
    ) -> Result<f64, DqLensError> {
        let total = self.client.count_rows(table).await?;
        let valid = self.client.count_matching(table, column, pattern).await?;
        Ok(conformity_ratio(valid, total))
    }
}

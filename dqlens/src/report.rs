//! Plain-text rendering of a maturity report.
//!
//! Scores are carried at full precision in the report and rounded to two
//! decimals only here.

use std::fmt::Write as _;

use dqlens_core::MaturityReport;

/// Renders the report for terminal output.
pub fn render(report: &MaturityReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Data Quality Maturity Report");
    let _ = writeln!(
        out,
        "Generated: {}",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Maturity Score: {:.2}%", report.score);
    let _ = writeln!(
        out,
        "Tables: {} | Columns: {} | Columns with issues: {}",
        report.total_tables, report.total_columns, report.total_issues
    );

    if report.is_perfect() {
        let _ = writeln!(out, "No data quality issues detected.");
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    for summary in report.table_summaries.values() {
        let _ = writeln!(out);
        if summary.is_clean() {
            let _ = writeln!(
                out,
                "{} ({} columns): no issues",
                summary.full_name, summary.total_columns
            );
            continue;
        }

        let _ = writeln!(
            out,
            "{} ({} columns, {} with issues)",
            summary.full_name,
            summary.total_columns,
            summary.findings.len()
        );
        for finding in &summary.findings {
            let _ = writeln!(
                out,
                "  {} [{}]",
                finding.column.name, finding.semantic_type
            );
            let _ = writeln!(
                out,
                "    completeness {:.2}% | uniqueness {:.2}% | conformity {:.2}%",
                finding.scores.completeness,
                finding.scores.uniqueness,
                finding.scores.conformity
            );
            let issues: Vec<&str> = finding.issues.iter().map(|i| i.as_str()).collect();
            let _ = writeln!(out, "    issues: {}", issues.join(", "));
            for hint in &finding.recommendations {
                let _ = writeln!(out, "    - {}", hint);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqlens_core::{
        ColumnDescriptor, ColumnFinding, ColumnIssue, QualityScores, SemanticType, TableRef,
        TableSummary,
    };
    use indexmap::IndexMap;

    fn sample_report() -> MaturityReport {
        let table = TableRef::new("crm", "contacts");
        let finding = ColumnFinding {
            column: ColumnDescriptor::new(&table, "email_addr", "text"),
            semantic_type: SemanticType::Email,
            scores: QualityScores {
                completeness: 90.0,
                uniqueness: 100.0,
                conformity: 80.0,
            },
            issues: vec![ColumnIssue::LowConformity],
            recommendations: vec![
                "Correct data entries to match the expected format and improve conformity."
                    .to_string(),
            ],
        };

        let mut summaries = IndexMap::new();
        summaries.insert(
            "crm.contacts".to_string(),
            TableSummary {
                full_name: "crm.contacts".to_string(),
                total_columns: 4,
                findings: vec![finding],
            },
        );
        summaries.insert(
            "crm.accounts".to_string(),
            TableSummary {
                full_name: "crm.accounts".to_string(),
                total_columns: 3,
                findings: vec![],
            },
        );

        MaturityReport::new(2, 7, 1, summaries, vec![])
    }

    #[test]
    fn test_render_scores_two_decimals() {
        let text = render(&sample_report());
        // 6 of 7 columns clean
        assert!(text.contains("Maturity Score: 85.71%"));
        assert!(text.contains("completeness 90.00% | uniqueness 100.00% | conformity 80.00%"));
    }

    #[test]
    fn test_render_lists_issues_and_hints() {
        let text = render(&sample_report());
        assert!(text.contains("email_addr [email]"));
        assert!(text.contains("issues: Low conformity"));
        assert!(text.contains("improve conformity."));
    }

    #[test]
    fn test_render_marks_clean_tables() {
        let text = render(&sample_report());
        assert!(text.contains("crm.accounts (3 columns): no issues"));
    }

    #[test]
    fn test_render_perfect_report_banner() {
        let report = MaturityReport::new(1, 5, 0, IndexMap::new(), vec![]);
        let text = render(&report);
        assert!(text.contains("Maturity Score: 100.00%"));
        assert!(text.contains("No data quality issues detected."));
    }

    #[test]
    fn test_render_includes_warnings() {
        let report = MaturityReport::new(
            1,
            0,
            0,
            IndexMap::new(),
            vec!["Skipped table crm.broken: Metadata fetch failed".to_string()],
        );
        let text = render(&report);
        assert!(text.contains("Warnings:"));
        assert!(text.contains("crm.broken"));
    }
}

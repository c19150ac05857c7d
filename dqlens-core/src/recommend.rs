//! Issue detection and remediation hints.
//!
//! Thresholds are fixed constants, not configuration. Issue detection and
//! hint emission share them so an entry is present in the recommendations
//! exactly when the corresponding issue fires.

use crate::models::{ColumnIssue, QualityScores};

/// Completeness below this percentage raises `LowCompleteness`.
pub const COMPLETENESS_THRESHOLD: f64 = 90.0;

/// Uniqueness below this percentage raises `DuplicatesPresent`.
pub const UNIQUENESS_THRESHOLD: f64 = 100.0;

/// Conformity below this percentage raises `LowConformity`.
pub const CONFORMITY_THRESHOLD: f64 = 90.0;

const COMPLETENESS_HINT: &str =
    "Consider fixing null or missing values to improve completeness.";
const UNIQUENESS_HINT: &str = "Check for duplicate values to improve uniqueness.";
const CONFORMITY_HINT: &str =
    "Correct data entries to match the expected format and improve conformity.";

/// Derives the issue set for a column's scores, in fixed order:
/// completeness, then uniqueness, then conformity.
pub fn detect_issues(scores: &QualityScores) -> Vec<ColumnIssue> {
    let mut issues = Vec::new();
    if scores.completeness < COMPLETENESS_THRESHOLD {
        issues.push(ColumnIssue::LowCompleteness);
    }
    if scores.uniqueness < UNIQUENESS_THRESHOLD {
        issues.push(ColumnIssue::DuplicatesPresent);
    }
    if scores.conformity < CONFORMITY_THRESHOLD {
        issues.push(ColumnIssue::LowConformity);
    }
    issues
}

/// Maps scores to ordered remediation hints.
///
/// Pure and deterministic. Emission order is always completeness hint,
/// uniqueness hint, conformity hint; each appears iff its threshold
/// condition holds. No failure mode.
pub fn recommend(completeness: f64, uniqueness: f64, conformity: f64) -> Vec<String> {
    let mut recommendations = Vec::new();
    if completeness < COMPLETENESS_THRESHOLD {
        recommendations.push(COMPLETENESS_HINT.to_string());
    }
    if uniqueness < UNIQUENESS_THRESHOLD {
        recommendations.push(UNIQUENESS_HINT.to_string());
    }
    if conformity < CONFORMITY_THRESHOLD {
        recommendations.push(CONFORMITY_HINT.to_string());
    }
    recommendations
}

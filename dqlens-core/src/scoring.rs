//! Quality score arithmetic.
//!
//! Pure ratio functions over aggregate counts. All scores are percentages
//! in `[0, 100]` at full precision; two-decimal rounding happens only at
//! display time. Division is guarded, never NaN.
//!
//! Zero-row tables score 100 on every axis (vacuously complete, unique,
//! and conformant), so an empty table never raises issues.

/// Completeness: percentage of non-null values in a column.
///
/// 100 when the table has zero rows.
pub fn completeness_ratio(non_null: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        (non_null as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Uniqueness: percentage of non-null values that are distinct.
///
/// 100 when the table has zero rows; 0 when rows exist but the column
/// holds no non-null values (the completeness axis flags those columns).
pub fn uniqueness_ratio(distinct_non_null: u64, non_null: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else if non_null == 0 {
        0.0
    } else {
        (distinct_non_null as f64 / non_null as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Conformity: percentage of rows whose value matches the type pattern.
///
/// The denominator is the full row count: null or absent values count as
/// not matching. 100 when the table has zero rows (vacuous pass).
pub fn conformity_ratio(valid: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        (valid as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Maturity score: percentage of columns with no detected issue.
///
/// 100 when no columns were analyzed.
pub fn maturity_score(total_columns: u64, total_issues: u64) -> f64 {
    if total_columns == 0 {
        100.0
    } else {
        ((total_columns.saturating_sub(total_issues)) as f64 / total_columns as f64 * 100.0)
            .clamp(0.0, 100.0)
    }
}

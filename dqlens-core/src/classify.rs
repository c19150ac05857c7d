//! Column type classification from column names.
//!
//! Columns are assigned a coarse semantic type by case-insensitive
//! substring matching on the column name. The precedence is
//! email > phone > date > unknown and first match wins: a column named
//! `phone_updated_date` classifies as `Phone` because `phone` is tested
//! before `date`. Downstream conformity scoring depends on this exact
//! order; changing it is a behavioral deviation.

use serde::{Deserialize, Serialize};

/// Validity pattern for email-typed columns.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Validity pattern for phone-typed columns: E.164-like, optional leading
/// `+`, first digit 1-9, at most 15 digits total.
pub const PHONE_PATTERN: &str = r"^\+?[1-9]\d{1,14}$";

/// Validity pattern for date-typed columns: exactly `YYYY-MM-DD`. No
/// calendar validation, so `9999-99-99` matches.
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Coarse classification of a column's expected content based on its name.
///
/// Closed set: adding a variant forces every dispatch site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Column name contains "email"
    Email,
    /// Column name contains "phone"
    Phone,
    /// Column name contains "date"
    Date,
    /// No keyword matched; no format is asserted
    Unknown,
}

impl SemanticType {
    /// Classifies a column name into a semantic type.
    ///
    /// Total over any string input: the empty string classifies as
    /// `Unknown`. No side effects, no failure mode.
    pub fn classify(column_name: &str) -> Self {
        let lower = column_name.to_lowercase();
        if lower.contains("email") {
            Self::Email
        } else if lower.contains("phone") {
            Self::Phone
        } else if lower.contains("date") {
            Self::Date
        } else {
            Self::Unknown
        }
    }

    /// Returns the validity pattern for this type, or `None` for
    /// `Unknown` (no format asserted, conformity is trivially satisfied).
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            Self::Email => Some(EMAIL_PATTERN),
            Self::Phone => Some(PHONE_PATTERN),
            Self::Date => Some(DATE_PATTERN),
            Self::Unknown => None,
        }
    }

    /// Lowercase display name for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

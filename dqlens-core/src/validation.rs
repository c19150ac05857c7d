//! Identifier validation and quoting for interpolated SQL names.
//!
//! Aggregate queries interpolate schema, table, and column names into SQL
//! text (they cannot be bound as parameters). Every interpolated name must
//! pass [`validate_identifier`] and go through [`quote_ident`].

use crate::error::{DqLensError, Result};

/// Maximum identifier length accepted for interpolation. Matches the
/// PostgreSQL identifier limit.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Validates an identifier before it is interpolated into SQL text.
///
/// Accepts any non-empty name up to 63 bytes that contains neither control
/// characters nor a double quote. Quoting handles the rest; the point here
/// is rejecting strings that could break out of a quoted identifier.
///
/// # Errors
/// Returns `DqLensError::Validation` for empty, oversized, or unsafe names.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DqLensError::validation("Identifier cannot be empty"));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(DqLensError::validation(format!(
            "Identifier too long ({} bytes, maximum {})",
            name.len(),
            MAX_IDENTIFIER_LEN
        )));
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(DqLensError::validation(
            "Identifier contains control characters",
        ));
    }
    if name.contains('"') {
        return Err(DqLensError::validation(
            "Identifier contains a double quote",
        ));
    }
    Ok(())
}

/// Wraps an identifier in double quotes for safe SQL interpolation.
///
/// Call [`validate_identifier`] first; this only adds the quoting.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

//! Identifier validation.
//!
//! Storage keys are built by concatenating a type prefix with a
//! caller-supplied identifier, and type-scoped range scans depend on keys
//! ordering predictably. Identifiers are therefore checked at write time
//! against a character whitelist; a bad identifier is rejected before
//! anything is stored, never discovered at scan time.
//!
//! Allowed identifier characters: `[a-zA-Z0-9:._-]`.

use std::fmt;

/// Maximum identifier length in UTF-8 bytes.
pub const MAX_ID_BYTES: usize = 64;

/// Validation error with structured context.
///
/// Contains the field name and the specific constraint that was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the violated constraint.
    pub constraint: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a record identifier.
///
/// Identifiers must:
/// - Be non-empty
/// - Not exceed [`MAX_ID_BYTES`] in UTF-8 byte length
/// - Contain only `[a-zA-Z0-9:._-]`
///
/// # Errors
///
/// Returns [`ValidationError`] naming the offending field if any constraint
/// is violated.
pub fn validate_id(field: &'static str, id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError {
            field: field.to_string(),
            constraint: "must not be empty".to_string(),
        });
    }
    if id.len() > MAX_ID_BYTES {
        return Err(ValidationError {
            field: field.to_string(),
            constraint: format!(
                "length {} bytes exceeds maximum {MAX_ID_BYTES} bytes",
                id.len()
            ),
        });
    }
    if let Some(pos) = id.find(|c: char| !is_id_char(c)) {
        return Err(ValidationError {
            field: field.to_string(),
            constraint: format!(
                "contains invalid character {:?} at byte offset {pos}; allowed: [a-zA-Z0-9:._-]",
                id[pos..].chars().next().unwrap_or('\0'),
            ),
        });
    }
    Ok(())
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '_' | '-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_identifiers() {
        for id in ["C1", "batch:2024.01", "T_missing", "a-b_c.d:e", "0"] {
            assert!(validate_id("id", id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        let err = validate_id("commodity_id", "").unwrap_err();
        assert_eq!(err.field, "commodity_id");
        assert!(err.constraint.contains("empty"));
    }

    #[test]
    fn rejects_overlong() {
        let id = "x".repeat(MAX_ID_BYTES + 1);
        let err = validate_id("id", &id).unwrap_err();
        assert!(err.constraint.contains("exceeds maximum"));
    }

    #[test]
    fn rejects_scan_breaking_characters() {
        for id in ["a b", "a/b", "a\u{7f}b", "ü", "a#b", "{id}"] {
            let err = validate_id("id", id).unwrap_err();
            assert!(
                err.constraint.contains("invalid character"),
                "{id}: {err}"
            );
        }
    }

    #[test]
    fn reports_offset_of_first_bad_character() {
        let err = validate_id("id", "ok ").unwrap_err();
        assert!(err.constraint.contains("offset 2"), "{err}");
    }
}

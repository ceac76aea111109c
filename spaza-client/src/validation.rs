//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits match what the backend accepts; they exist to fail fast with a
//! typed error before a request leaves the client.

use crate::error::{ClientError, ClientResult};

// ── Text length limits ──────────────────────────────────────────────

/// Names: applicant full name, business name, listing name
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone numbers, vehicle registrations
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Addresses and suburbs
pub const MAX_ADDRESS_LEN: usize = 500;

/// Free-text reasons and descriptions (rejection reason, vehicle description)
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if value.len() > max_len {
        return Err(ClientError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> ClientResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(ClientError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Thabo", "full_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "full_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "full_name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "vehicle_description", MAX_NOTE_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("bakkie".into()), "vehicle_description", MAX_NOTE_LEN)
                .is_ok()
        );
        assert!(
            validate_optional_text(
                &Some("x".repeat(501)),
                "vehicle_description",
                MAX_NOTE_LEN
            )
            .is_err()
        );
    }
}

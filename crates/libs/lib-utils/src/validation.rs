//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate that a list has at least one entry.
pub fn validate_non_empty_list<T>(values: &[T], field_name: &str) -> Result<(), String> {
    if values.is_empty() {
        Err(format!("{} must contain at least one entry", field_name))
    } else {
        Ok(())
    }
}

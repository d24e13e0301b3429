//! Custom validation functions for the cart quoting models
//!
//! Reusable field checks for the inbound cart request: required strings,
//! length bounds, and numeric constraints.

use super::error::{ValidationError, ValidationErrorKind};

/// Validate a required field is not empty
pub fn validate_required(value: &str, field_name: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(
            ValidationErrorKind::RequiredField,
            field_name,
        ))
    } else {
        Ok(())
    }
}

/// Validate a string does not exceed a maximum length
pub fn validate_max_length(
    value: &str,
    field_name: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.len() > max {
        Err(ValidationError::with_context(
            ValidationErrorKind::TooLong { max },
            field_name,
            format!("got {} characters", value.len()),
        ))
    } else {
        Ok(())
    }
}

/// Validate a float field is non-negative
pub fn validate_non_negative(value: f64, field_name: &str) -> Result<(), ValidationError> {
    // NaN is not a usable amount either
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::with_context(
            ValidationErrorKind::Negative,
            field_name,
            format!("got {}", value),
        ))
    }
}

/// Validate an integer field meets a minimum
pub fn validate_minimum(value: i64, field_name: &str, min: i64) -> Result<(), ValidationError> {
    if value < min {
        Err(ValidationError::with_context(
            ValidationErrorKind::BelowMinimum { min },
            field_name,
            format!("got {}", value),
        ))
    } else {
        Ok(())
    }
}

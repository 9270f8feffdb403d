//! Validation error types and field helpers

use std::fmt;

/// Validation error for submitted form data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't parse (timestamp, integer id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value is not one of the allowed choices
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a required text field of unbounded length.
///
/// Whitespace-only input counts as missing; anything else is kept exactly
/// as submitted.
pub fn present(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_owned()),
        _ => Err(ValidationError::Empty { field }),
    }
}

/// Validate a required text field of at most `max` chars.
pub fn required(field: &'static str, value: Option<&str>, max: usize) -> Result<String, ValidationError> {
    let value = present(field, value)?;
    check_len(field, &value, max)?;
    Ok(value)
}

/// Validate an optional text field. Blank input becomes `None`; anything
/// else is kept as submitted.
pub fn optional(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            check_len(field, v, max)?;
            Ok(Some(v.to_owned()))
        }
        _ => Ok(None),
    }
}

/// Parse a positive integer record id.
pub fn record_id(field: &'static str, value: Option<&str>) -> Result<i32, ValidationError> {
    let raw = value.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer id",
        }),
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

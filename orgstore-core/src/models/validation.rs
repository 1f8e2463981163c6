//! Validation error types for boundary shapes

use std::fmt;

/// Validation error raised before a shape reaches the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identity values start at 1
    NonPositiveId { value: i32 },

    /// Update payload names a different row than the one addressed
    IdMismatch { expected: i32, actual: i32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId { value } => write!(f, "id must be positive, got {}", value),
            Self::IdMismatch { expected, actual } => {
                write!(f, "payload id {} does not match target id {}", actual, expected)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject ids the identity column can never produce.
pub fn validate_id(id: i32) -> Result<i32, ValidationError> {
    if id <= 0 {
        return Err(ValidationError::NonPositiveId { value: id });
    }
    Ok(id)
}

//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body could not be decoded as the expected JSON shape
    Malformed { reason: String },

    /// Field doesn't match required format (e.g., non-integer id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Numeric field must be strictly positive
    NotPositive { field: &'static str },

    /// Partial update carries nothing to change
    NoFieldsProvided,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => write!(f, "invalid request body: {}", reason),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::NotPositive { field } => write!(f, "{} must be greater than 0", field),
            Self::NoFieldsProvided => write!(f, "at least one field must be provided"),
        }
    }
}

impl std::error::Error for ValidationError {}

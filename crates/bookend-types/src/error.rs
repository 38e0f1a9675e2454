//! Validation errors for record payloads.

use thiserror::Error;

/// Errors raised when validating a record draft or patch.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// Rating outside the 1-5 star range.
    #[error("Rating {0} is out of range (must be 1-5)")]
    RatingOutOfRange(u8),

    /// A date field that is not an ISO `YYYY-MM-DD` string.
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    /// Start date after end date.
    #[error("Start date {start} is after end date {end}")]
    DateOrder { start: String, end: String },
}

/// Result type alias for validation.
pub type ValidationResult = std::result::Result<(), ValidationError>;

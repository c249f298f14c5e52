//! Paging-argument validation
//!
//! Fail-fast checks for caller-supplied `limit` and `offset`. A rejection
//! here must prevent any backend call.

use crate::error::ValidationError;

/// Check a caller-supplied limit against the configured maximum.
///
/// An absent limit is valid; the engine substitutes its default afterwards.
pub fn check_limit(limit: Option<i64>, max_limit: i64) -> Result<(), ValidationError> {
    if let Some(value) = limit {
        if value < 0 || value > max_limit {
            return Err(ValidationError::LimitOutOfRange {
                value,
                max: max_limit,
            });
        }
    }
    Ok(())
}

/// Check a caller-supplied offset.
pub fn check_offset(offset: Option<i64>) -> Result<(), ValidationError> {
    if let Some(value) = offset {
        if value < 0 {
            return Err(ValidationError::NegativeOffset { value });
        }
    }
    Ok(())
}

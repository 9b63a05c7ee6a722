//! Argument checks shared by every endpoint that accepts these fields

use crate::error::{ValidationError, ValidationResult};

/// Smallest accepted `limit`
pub const MIN_LIMIT: i64 = 0;
/// Largest accepted `limit`
pub const MAX_LIMIT: i64 = 1000;

/// Check `0 <= limit <= 1000`
pub fn check_limit(limit: i64) -> ValidationResult<i64> {
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ValidationError::LimitOutOfRange { value: limit });
    }
    Ok(limit)
}

/// Check that an offset or time bound is not negative
pub fn check_non_negative(field: &'static str, value: i64) -> ValidationResult<i64> {
    if value < 0 {
        return Err(ValidationError::negative(field, value));
    }
    Ok(value)
}

/// Like [`check_non_negative`] for an optional value
pub fn check_non_negative_opt(field: &'static str, value: Option<i64>) -> ValidationResult<Option<i64>> {
    value.map(|v| check_non_negative(field, v)).transpose()
}

/// Check that a signature window is usable
///
/// Only the lower bound is enforced here; the exchange enforces the upper one.
pub fn check_window(window: u64) -> ValidationResult<u64> {
    if window == 0 {
        return Err(ValidationError::ZeroWindow);
    }
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_bounds() {
        assert_eq!(check_limit(0), Ok(0));
        assert_eq!(check_limit(1000), Ok(1000));
        assert_eq!(
            check_limit(1001),
            Err(ValidationError::LimitOutOfRange { value: 1001 })
        );
        assert_eq!(
            check_limit(-1),
            Err(ValidationError::LimitOutOfRange { value: -1 })
        );
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(check_non_negative("offset", 0), Ok(0));
        assert_eq!(
            check_non_negative("offset", -1),
            Err(ValidationError::NegativeValue { field: "offset", value: -1 })
        );
        assert_eq!(check_non_negative_opt("to", None), Ok(None));
        assert!(check_non_negative_opt("to", Some(-5)).is_err());
    }

    #[test]
    fn test_window() {
        assert_eq!(check_window(5000), Ok(5000));
        assert_eq!(check_window(0), Err(ValidationError::ZeroWindow));
    }
}

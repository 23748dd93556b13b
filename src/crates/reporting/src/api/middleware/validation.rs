//! Request validation utilities
//!
//! Provides validation helpers for ensuring request data meets requirements.

use crate::api::error::{ApiError, ApiResult};

/// Validate that a required string field is not blank
pub fn validate_not_empty(value: &str, field_name: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{} cannot be empty", field_name)));
    }
    Ok(())
}

/// Unwrap a required field, rejecting absent or blank values
pub fn require_field<'a>(value: Option<&'a str>, field_name: &str) -> ApiResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::ValidationError(format!("{} is required", field_name))),
    }
}

/// Validate a minimum string length in characters
pub fn validate_min_length(value: &str, field_name: &str, min: usize) -> ApiResult<()> {
    if value.chars().count() < min {
        return Err(ApiError::ValidationError(format!(
            "{} must be at least {} characters",
            field_name, min
        )));
    }
    Ok(())
}

/// Parse an integer path ID
pub fn parse_integer_id(value: &str) -> ApiResult<i64> {
    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Gate reader", "title").is_ok());
        assert!(validate_not_empty("", "title").is_err());
        assert!(validate_not_empty("   ", "title").is_err());
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("F-BUS-300"), "requirement_id").unwrap(), "F-BUS-300");
        let err = require_field(None, "requirement_id").unwrap_err();
        assert_eq!(err.to_string(), "requirement_id is required");
        assert!(require_field(Some(""), "requirement_id").is_err());
    }

    #[test]
    fn test_validate_min_length() {
        assert!(validate_min_length("secret", "newPassword", 6).is_ok());
        assert!(validate_min_length("short", "newPassword", 6).is_err());
    }

    #[test]
    fn test_parse_integer_id() {
        assert_eq!(parse_integer_id("42").unwrap(), 42);
        assert!(matches!(parse_integer_id("abc"), Err(ApiError::BadRequest(_))));
    }
}

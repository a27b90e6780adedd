pub mod auth_dto;
pub mod user_dto;
pub mod item_dto;
pub mod claim_dto;
pub mod admin_dto;

use serde::Serialize;
use validator::{ValidateEmail, ValidationError};

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse { message: message.into() }
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Campus roll numbers are exactly seven ASCII digits.
pub(crate) fn validate_roll_number(value: &str) -> Result<(), ValidationError> {
    if value.len() == 7 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("roll_number"))
    }
}

pub(crate) fn validate_section(value: &str) -> Result<(), ValidationError> {
    match value {
        "A" | "B" | "C" => Ok(()),
        _ => Err(ValidationError::new("section")),
    }
}

/// Blank counts as "not provided" on partial updates.
pub(crate) fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_number_must_be_seven_digits() {
        assert!(validate_roll_number("1234567").is_ok());
        assert!(validate_roll_number("123456").is_err());
        assert!(validate_roll_number("12345678").is_err());
        assert!(validate_roll_number("12345a7").is_err());
    }

    #[test]
    fn test_section_is_a_to_c() {
        assert!(validate_section("A").is_ok());
        assert!(validate_section("C").is_ok());
        assert!(validate_section("D").is_err());
        assert!(validate_section("a").is_err());
        assert!(validate_section("AB").is_err());
    }

    #[test]
    fn test_optional_email_accepts_blank() {
        assert!(optional_email("").is_ok());
        assert!(optional_email("  ").is_ok());
        assert!(optional_email("a@x.com").is_ok());
        assert!(optional_email("not-an-email").is_err());
    }

    #[test]
    fn test_non_blank_trims() {
        assert_eq!(non_blank(Some("  Library ".to_string())), Some("Library".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}

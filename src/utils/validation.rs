//! Validation utilities
//!
//! Field-level validation for request payloads: lengths, character sets,
//! and formats.

use crate::utils::error::{ApiError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("username regex"));

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color regex"));

/// Data validation utilities
pub struct DataValidator;

impl DataValidator {
    /// Validate username
    pub fn validate_username(username: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(ApiError::Validation("Username cannot be empty".to_string()));
        }

        if username.len() < 3 {
            return Err(ApiError::Validation(
                "Username must be at least 3 characters".to_string(),
            ));
        }

        if username.len() > 50 {
            return Err(ApiError::Validation(
                "Username cannot exceed 50 characters".to_string(),
            ));
        }

        if !USERNAME_REGEX.is_match(username) {
            return Err(ApiError::Validation(
                "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate email address format
    pub fn validate_email(email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(ApiError::Validation("Email cannot be empty".to_string()));
        }

        if email.len() > 254 {
            return Err(ApiError::Validation(
                "Email cannot exceed 254 characters".to_string(),
            ));
        }

        if !EMAIL_REGEX.is_match(email) {
            return Err(ApiError::Validation("Email format is invalid".to_string()));
        }

        Ok(())
    }

    /// Validate password strength
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < 8 {
            return Err(ApiError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if password.len() > 128 {
            return Err(ApiError::Validation(
                "Password cannot exceed 128 characters".to_string(),
            ));
        }

        let has_lowercase = password.chars().any(|c| c.is_lowercase());
        let has_uppercase = password.chars().any(|c| c.is_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password
            .chars()
            .any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c));

        let strength_count = [has_lowercase, has_uppercase, has_digit, has_special]
            .iter()
            .filter(|&&x| x)
            .count();

        if strength_count < 3 {
            return Err(ApiError::Validation(
                "Password must contain at least 3 of: lowercase, uppercase, digit, special character".to_string()
            ));
        }

        Ok(())
    }

    /// Validate a workspace, project, or task title
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("Title cannot be empty".to_string()));
        }

        if title.len() > 100 {
            return Err(ApiError::Validation(
                "Title cannot exceed 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate comment content
    pub fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(ApiError::Validation("Content cannot be empty".to_string()));
        }

        if content.len() > 5000 {
            return Err(ApiError::Validation(
                "Content cannot exceed 5000 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a tag color (#RRGGBB)
    pub fn validate_color(color: &str) -> Result<()> {
        if !HEX_COLOR_REGEX.is_match(color) {
            return Err(ApiError::Validation(
                "Color must be a #RRGGBB hex value".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(DataValidator::validate_username("valid_user").is_ok());
        assert!(DataValidator::validate_username("user123").is_ok());
        assert!(DataValidator::validate_username("").is_err());
        assert!(DataValidator::validate_username("ab").is_err());
        assert!(DataValidator::validate_username("invalid@user").is_err());
    }

    #[test]
    fn test_email_validation() {
        assert!(DataValidator::validate_email("user@example.com").is_ok());
        assert!(DataValidator::validate_email("not-an-email").is_err());
        assert!(DataValidator::validate_email("").is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(DataValidator::validate_password("StrongPass123!").is_ok());
        assert!(DataValidator::validate_password("NoSpecialChars123").is_ok());
        assert!(DataValidator::validate_password("weak").is_err());
        assert!(DataValidator::validate_password("alllowercase").is_err());
    }

    #[test]
    fn test_title_validation() {
        assert!(DataValidator::validate_title("My Workspace").is_ok());
        assert!(DataValidator::validate_title("   ").is_err());
        assert!(DataValidator::validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_color_validation() {
        assert!(DataValidator::validate_color("#ff00aa").is_ok());
        assert!(DataValidator::validate_color("#FF00AA").is_ok());
        assert!(DataValidator::validate_color("ff00aa").is_err());
        assert!(DataValidator::validate_color("#ff00a").is_err());
    }
}

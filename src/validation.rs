// Validation utilities module
// Custom validation functions for domain-specific rules

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,50}$").expect("username pattern is valid"))
}

/// Usernames are 3-50 characters of letters, digits, `_`, `.` or `-`
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username_pattern().is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_username");
        err.message = Some("Username must be 3-50 characters of letters, digits, '_', '.' or '-'".into());
        Err(err)
    }
}

/// Category names must contain something besides whitespace
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("blank_name");
        err.message = Some("Name must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Parent ids are 0 (top level) or a positive category id
pub fn validate_parent_id(parent_id: i32) -> Result<(), ValidationError> {
    if parent_id < 0 {
        Err(ValidationError::new("negative_parent_id"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("a.b-c_d").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_category_name_rules() {
        assert!(validate_category_name("Tech").is_ok());
        assert!(validate_category_name("   ").is_err());
    }

    #[test]
    fn test_parent_id_rules() {
        assert!(validate_parent_id(0).is_ok());
        assert!(validate_parent_id(12).is_ok());
        assert!(validate_parent_id(-1).is_err());
    }
}

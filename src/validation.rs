//! Form Validation
//!
//! Field checks shared by the CRUD forms. Errors carry the field label so
//! they can be shown inline next to the input.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Ministry and department codes: uppercase, 2-16 chars
pub static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_-]{1,15}$").expect("valid code pattern"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9._-]{2,31}$").expect("valid username pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} has an invalid format ({hint})")]
    Pattern { field: &'static str, hint: &'static str },
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    #[error("{0} must be a whole number")]
    InvalidNumber(&'static str),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required(field)
            | Self::InvalidEmail(field)
            | Self::InvalidNumber(field)
            | Self::TooLong { field, .. }
            | Self::TooShort { field, .. }
            | Self::Pattern { field, .. } => *field,
        }
    }
}

/// Trimmed non-empty value
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

/// Trimmed value, `None` when blank
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn max_len(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}

pub fn min_len(field: &'static str, value: String, min: usize) -> Result<String, ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(value)
}

pub fn pattern(
    field: &'static str,
    value: String,
    re: &Regex,
    hint: &'static str,
) -> Result<String, ValidationError> {
    if !re.is_match(&value) {
        return Err(ValidationError::Pattern { field, hint });
    }
    Ok(value)
}

/// Required uppercase code such as `FIN` or `HEALTH-PH`
pub fn code(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?.to_uppercase();
    pattern(field, value, &CODE_PATTERN, "2-16 letters, digits, '-' or '_'")
}

pub fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    if !EMAIL_PATTERN.is_match(&value) {
        return Err(ValidationError::InvalidEmail(field));
    }
    Ok(value)
}

pub fn username(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?.to_lowercase();
    pattern(field, value, &USERNAME_PATTERN, "3-32 lowercase letters, digits, '.', '-' or '_'")
}

/// Required numeric id (select boxes hold ids as strings)
pub fn required_id(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    let value = required(field, value)?;
    value.parse().map_err(|_| ValidationError::InvalidNumber(field))
}

pub fn optional_id(field: &'static str, value: &str) -> Result<Option<u32>, ValidationError> {
    match optional(value) {
        Some(v) => v.parse().map(Some).map_err(|_| ValidationError::InvalidNumber(field)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims() {
        assert_eq!(required("Name", "  Finance "), Ok("Finance".to_string()));
        assert_eq!(required("Name", "   "), Err(ValidationError::Required("Name")));
        assert_eq!(optional(" "), None);
    }

    #[test]
    fn codes_are_uppercased_then_checked() {
        assert_eq!(code("Code", "fin"), Ok("FIN".to_string()));
        assert_eq!(code("Code", "HEALTH-PH"), Ok("HEALTH-PH".to_string()));
        assert!(matches!(code("Code", "F"), Err(ValidationError::Pattern { field: "Code", .. })));
        assert!(matches!(code("Code", "1FIN"), Err(ValidationError::Pattern { .. })));
        assert_eq!(code("Code", ""), Err(ValidationError::Required("Code")));
    }

    #[test]
    fn email_format() {
        assert!(email("Email", "a.b@gov.example").is_ok());
        assert_eq!(email("Email", "not-an-email"), Err(ValidationError::InvalidEmail("Email")));
    }

    #[test]
    fn usernames_and_ids() {
        assert_eq!(username("Username", "JDoe"), Ok("jdoe".to_string()));
        assert!(username("Username", "jd").is_err());
        assert_eq!(required_id("Ministry", "12"), Ok(12));
        assert_eq!(required_id("Ministry", "x"), Err(ValidationError::InvalidNumber("Ministry")));
        assert_eq!(optional_id("Reports to", ""), Ok(None));
        assert_eq!(optional_id("Reports to", "3"), Ok(Some(3)));
    }

    #[test]
    fn length_limit_counts_chars() {
        assert!(max_len("Name", "é".repeat(5), 5).is_ok());
        assert_eq!(
            max_len("Name", "abcdef".to_string(), 5),
            Err(ValidationError::TooLong { field: "Name", max: 5 })
        );
    }

    #[test]
    fn minimum_length() {
        assert!(min_len("Password", "longenough".to_string(), 8).is_ok());
        assert_eq!(
            min_len("Password", "short".to_string(), 8),
            Err(ValidationError::TooShort { field: "Password", min: 8 })
        );
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(ValidationError::Required("Code").to_string(), "Code is required");
        assert_eq!(ValidationError::InvalidEmail("Email").field(), "Email");
    }
}

//! Input validation for user-facing fields.
//!
//! Each validator returns `Ok(())` when the value is acceptable, or `Err` with
//! a human-readable explanation. Transport layers collect failures into
//! [`FieldViolation`]s so a single response can report every bad field.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum/maximum username length in characters.
pub const USERNAME_LENGTH: (usize, usize) = (3, 100);
/// Minimum/maximum full name length in characters.
pub const FULL_NAME_LENGTH: (usize, usize) = (3, 100);
/// Minimum/maximum password length in characters.
pub const PASSWORD_LENGTH: (usize, usize) = (6, 100);
/// Minimum/maximum email length in characters.
pub const EMAIL_LENGTH: (usize, usize) = (3, 200);

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("username pattern is valid"));
static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("full name pattern is valid"));

/// A single invalid request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub description: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, description: impl Into<String>) -> Self {
        Self {
            field,
            description: description.into(),
        }
    }
}

/// Fold a list of per-field results into a [`CoreError::Validation`].
///
/// Returns `Ok(())` when every field passed.
pub fn ensure_valid(violations: &[FieldViolation]) -> Result<(), CoreError> {
    if violations.is_empty() {
        return Ok(());
    }
    let message = violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.description))
        .collect::<Vec<_>>()
        .join("; ");
    Err(CoreError::Validation(message))
}

fn validate_length(value: &str, (min, max): (usize, usize)) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(format!("must contain from {min}-{max} characters"));
    }
    Ok(())
}

pub fn validate_username(value: &str) -> Result<(), String> {
    validate_length(value, USERNAME_LENGTH)?;
    if !USERNAME_RE.is_match(value) {
        return Err("must contain only lowercase letters, digits, or underscore".into());
    }
    Ok(())
}

pub fn validate_full_name(value: &str) -> Result<(), String> {
    validate_length(value, FULL_NAME_LENGTH)?;
    if !FULL_NAME_RE.is_match(value) {
        return Err("must contain only letters or spaces".into());
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), String> {
    validate_length(value, PASSWORD_LENGTH)
}

pub fn validate_email(value: &str) -> Result<(), String> {
    validate_length(value, EMAIL_LENGTH)?;
    if !value.validate_email() {
        return Err("is not a valid email address".into());
    }
    Ok(())
}

/// Accepts any three-letter upper-case code; which currencies the bank
/// actually supports is decided elsewhere.
pub fn validate_currency_code(value: &str) -> Result<(), String> {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err("must be a three-letter upper-case currency code".into());
    }
    Ok(())
}

/// Run `check` against `value` and push a violation for `field` on failure.
pub fn check_field(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: &str,
    check: fn(&str) -> Result<(), String>,
) {
    if let Err(description) = check(value) {
        violations.push(FieldViolation::new(field, description));
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("al").is_err());
        assert!(validate_username("Alice").is_err());
        assert!(validate_username("alice-smith").is_err());
    }

    #[test]
    fn full_name_rules() {
        assert!(validate_full_name("Alice Smith").is_ok());
        assert!(validate_full_name("Alice 2").is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(101)).is_err());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn currency_code_shape() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("usd").is_err());
        assert!(validate_currency_code("invalid").is_err());
        assert!(validate_currency_code("").is_err());
    }

    #[test]
    fn ensure_valid_joins_every_violation() {
        let mut violations = Vec::new();
        check_field(&mut violations, "username", "A", validate_username);
        check_field(&mut violations, "password", "123", validate_password);
        check_field(&mut violations, "email", "alice@example.com", validate_email);

        assert_eq!(violations.len(), 2);
        assert_matches!(
            ensure_valid(&violations),
            Err(CoreError::Validation(msg)) if msg.contains("username") && msg.contains("password")
        );
        assert!(ensure_valid(&[]).is_ok());
    }
}

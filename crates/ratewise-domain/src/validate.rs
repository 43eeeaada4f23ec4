//! Input validation rules.
//!
//! All length rules count Unicode scalar values, not bytes. Each check
//! returns `None` on success or a [`FieldError`] naming the offending field,
//! so callers can collect every violation into a single 400 response.

use serde::Serialize;

/// Password special characters accepted by [`password`].
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Registration display name: 20–60 characters.
pub fn registration_name(name: &str) -> Option<FieldError> {
    let len = char_len(name);
    if !(20..=60).contains(&len) {
        return Some(FieldError::new(
            "name",
            "name must be between 20 and 60 characters",
        ));
    }
    None
}

/// Display name on admin create / profile update: 2–60 characters.
pub fn profile_name(name: &str) -> Option<FieldError> {
    let len = char_len(name);
    if !(2..=60).contains(&len) {
        return Some(FieldError::new(
            "name",
            "name must be between 2 and 60 characters",
        ));
    }
    None
}

/// Password: 8–16 characters, at least one uppercase letter and one of
/// [`PASSWORD_SPECIALS`].
pub fn password(password: &str) -> Option<FieldError> {
    let len = char_len(password);
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if !(8..=16).contains(&len) || !has_upper || !has_special {
        return Some(FieldError::new(
            "password",
            "password must be 8-16 characters with at least one uppercase letter and one special character",
        ));
    }
    None
}

/// Postal address: at most 400 characters.
pub fn address(address: &str) -> Option<FieldError> {
    if char_len(address) > 400 {
        return Some(FieldError::new(
            "address",
            "address cannot exceed 400 characters",
        ));
    }
    None
}

/// Minimal structural email check: one `@`, non-empty local part, and a dot
/// in the domain.
pub fn email(email: &str) -> Option<FieldError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Some(FieldError::new("email", "please include a valid email"));
    }
    None
}

/// Store name: 1–100 characters.
pub fn store_name(name: &str) -> Option<FieldError> {
    let len = char_len(name);
    if !(1..=100).contains(&len) {
        return Some(FieldError::new(
            "name",
            "store name must be between 1 and 100 characters",
        ));
    }
    None
}

/// Store address: 1–400 characters.
pub fn store_address(addr: &str) -> Option<FieldError> {
    let len = char_len(addr);
    if !(1..=400).contains(&len) {
        return Some(FieldError::new(
            "address",
            "address must be between 1 and 400 characters",
        ));
    }
    None
}

/// Rating value: integer in [1, 5]. Zero is never a legal value.
pub fn rating_value(value: u8) -> Option<FieldError> {
    if !(1..=5).contains(&value) {
        return Some(FieldError::new(
            "rating",
            "rating must be between 1 and 5",
        ));
    }
    None
}

//! Contact form validation

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// `local@domain.tld`: non-blank runs without `@`, an `@`, and a final dotted run
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// A contact form field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field failed validation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldError {
    #[error("field is empty")]
    EmptyField,
    #[error("field has an invalid format")]
    InvalidFormat,
}

impl FieldError {
    /// The message shown next to `field`
    pub fn message_for(&self, field: Field) -> &'static str {
        match (self, field) {
            (FieldError::EmptyField, Field::Name) => "Name is required",
            (FieldError::EmptyField, Field::Email) => "Email is required",
            (FieldError::EmptyField, Field::Message) => "Message is required",
            (FieldError::InvalidFormat, Field::Email) => "Invalid email format",
            (FieldError::InvalidFormat, Field::Name) => "Invalid name",
            (FieldError::InvalidFormat, Field::Message) => "Invalid message",
        }
    }
}

/// Per-field errors; a field without an entry is valid
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(IndexMap<Field, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|err| err.message_for(field))
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Clear one field's error; returns true if there was one
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.shift_remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, err)| (*field, *err))
    }
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::error!(%err, "email pattern failed to compile");
                None
            }
        })
        .as_ref()
}

/// Check `email` against the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|regex| regex.is_match(email))
}

/// Validate all three fields from scratch
///
/// Emptiness is judged on trimmed values; the email format check runs on the
/// raw value.
pub fn validate(name: &str, email: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if name.trim().is_empty() {
        errors.insert(Field::Name, FieldError::EmptyField);
    }
    if email.trim().is_empty() {
        errors.insert(Field::Email, FieldError::EmptyField);
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, FieldError::InvalidFormat);
    }
    if message.trim().is_empty() {
        errors.insert(Field::Message, FieldError::EmptyField);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern_compiles() {
        assert!(email_regex().is_some());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        for bad in ["user@example", "user@.com", "userexample.com", "", "a b@c.d", "@x.com"] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_single_missing_field() {
        let errors = validate("Jane", "jane@x.com", "");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Message), Some(FieldError::EmptyField));
        assert_eq!(errors.get(Field::Name), None);
        assert_eq!(errors.get(Field::Email), None);
        assert_eq!(errors.message(Field::Message), Some("Message is required"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let errors = validate("   ", "  ", "\n\t");
        assert_eq!(errors.message(Field::Name), Some("Name is required"));
        assert_eq!(errors.message(Field::Email), Some("Email is required"));
        assert_eq!(errors.message(Field::Message), Some("Message is required"));
    }

    #[test]
    fn test_padded_email_fails_format() {
        let errors = validate("Jane", " jane@x.com", "hi");
        assert_eq!(errors.message(Field::Email), Some("Invalid email format"));
    }

    #[test]
    fn test_clear_only_touches_one_field() {
        let mut errors = validate("", "nope", "");
        assert_eq!(errors.len(), 3);
        assert!(errors.clear(Field::Email));
        assert!(!errors.clear(Field::Email));
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::Name).is_some());
    }
}

//! Field validation for record forms.
//!
//! Validation never stops at the first problem: every field error is
//! collected so the form can show all of them at once.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Kind of problem found on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Field is empty or whitespace.
    Required,
    /// Field is not shaped like `local@domain.tld`.
    InvalidEmail,
}

/// A single field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Message shown next to the offending input.
    pub fn message(&self) -> String {
        match self.kind {
            FieldErrorKind::Required => format!("{} is required", capitalize(self.field)),
            FieldErrorKind::InvalidEmail => "Please enter a valid email address".to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message())
    }
}

/// All validation errors of one record, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.errors.push(FieldError { field, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First error reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Requires a non-blank value.
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, FieldErrorKind::Required);
        }
        self
    }

    /// Requires a non-blank, email-shaped value. Reports at most one error.
    pub fn require_email(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, FieldErrorKind::Required);
        } else if !is_valid_email(value) {
            self.push(field, FieldErrorKind::InvalidEmail);
        }
        self
    }

    /// Converts the collected errors into a result.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "validation failed: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks the `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Upper-cases the first character (`"name"` -> `"Name"`).
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("no-domain@"));
        assert!(!is_valid_email("user@host"));
        assert!(!is_valid_email("with space@example.com"));
        assert!(!is_valid_email("two@@example.com"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut errors = ValidationErrors::new();
        errors.require("name", "  ").require_email("email", "bad");
        let err = errors.finish().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.for_field("name").unwrap().kind, FieldErrorKind::Required);
        assert_eq!(
            err.for_field("email").unwrap().kind,
            FieldErrorKind::InvalidEmail
        );
    }

    #[test]
    fn test_blank_email_is_required_not_invalid() {
        let mut errors = ValidationErrors::new();
        errors.require_email("email", "");
        let err = errors.finish().unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].message(), "Email is required");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("created"), "Created");
        assert_eq!(capitalize(""), "");
    }
}

//! Input validation for document requests.
//!
//! Errors carry the field name, a readable message and an optional hint, and are
//! collected so a caller sees every problem in one response.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Validation error with a user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
    /// How to fix the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
            .with_suggestion(format!("Provide a value for {}", label.to_lowercase()))
    }

    pub fn too_short(field: &str, label: &str, min: usize) -> Self {
        Self::new(
            field,
            format!("{} must be at least {} characters long", label, min),
        )
    }

    pub fn invalid_email(field: &str) -> Self {
        Self::new(field, "Email address is not valid")
            .with_suggestion("Use a full address, for example: name@example.com")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// One-line summary used as the `message` of an error response.
    pub fn to_message(&self) -> String {
        match self.errors.as_slice() {
            [] => String::new(),
            [only] => only.message.clone(),
            many => format!("Validation failed: {} errors found", many.len()),
        }
    }

    /// Ok if nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate a minimum trimmed length in characters
pub fn validate_min_length(
    value: &str,
    min: usize,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, label));
        return;
    }

    if trimmed.chars().count() < min {
        errors.add(ValidationError::too_short(field, label, min));
    }
}

pub fn validate_email(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Email"));
        return;
    }

    if !EMAIL.is_match(trimmed) {
        errors.add(ValidationError::invalid_email(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_whitespace() {
        let mut errors = ValidationErrors::new();
        validate_required("   ", "companyName", "Company name", &mut errors);
        assert!(errors.has_field("companyName"));
    }

    #[test]
    fn test_min_length_counts_chars_not_bytes() {
        let mut errors = ValidationErrors::new();
        validate_min_length("çğışöüçğış", 10, "jobDescription", "Job description", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email_shapes() {
        let mut errors = ValidationErrors::new();
        validate_email("jane@example.com", "email", &mut errors);
        assert!(errors.is_empty());

        validate_email("jane@", "email", &mut errors);
        validate_email("jane example@x.io", "email", &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_message_summarizes_many_errors() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("a", "first"));
        assert_eq!(errors.to_message(), "first");
        errors.add(ValidationError::new("b", "second"));
        assert_eq!(errors.to_message(), "Validation failed: 2 errors found");
    }
}

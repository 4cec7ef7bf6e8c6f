//! Configuration validation.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.rule {
            Some(rule) => write!(f, "{}: {} (rule: {})", self.field, self.message, rule),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns every validation error, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and converts failures into an [`AnalysisError`].
    fn validate_or_error(&self) -> AnalysisResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => match errors.pop() {
                Some(err) => Err(AnalysisError::InvalidConfig {
                    field: err.field,
                    message: err.message,
                }),
                None => Ok(()),
            },
            _ => Err(AnalysisError::MultipleValidationErrors(errors)),
        }
    }
}

/// Pushes an error unless `value` is finite and non-negative.
pub(crate) fn check_non_negative(errors: &mut Vec<ValidationError>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(ValidationError::with_rule(
            field,
            format!("must be finite, got {value}"),
            "finite",
        ));
    } else if value < 0.0 {
        errors.push(ValidationError::with_rule(
            field,
            format!("must be non-negative, got {value}"),
            "non_negative",
        ));
    }
}

//! Error types for portfolio analysis.

use finplan_core::{AgeGroup, CoreError, RiskProfile};
use thiserror::Error;

use crate::config::ValidationError;

/// A specialized Result type for portfolio analysis.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during portfolio analysis.
///
/// Numerical failures never surface here: a fund whose XIRR cannot be solved
/// reports `0.0` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The allocation table has no cell for this investor profile.
    #[error("No target allocation for age group {age_group} and risk profile {risk_profile}")]
    MissingAllocationTarget {
        /// Requested age group.
        age_group: AgeGroup,
        /// Requested risk profile.
        risk_profile: RiskProfile,
    },

    /// Portfolio analysis was requested without any transactions.
    #[error("No transactions loaded: cannot analyze an empty portfolio")]
    EmptyPortfolio,

    /// A single configuration field is invalid.
    #[error("Invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Field that failed validation.
        field: String,
        /// Validation message.
        message: String,
    },

    /// Several configuration fields are invalid.
    #[error("Multiple configuration errors: {}", format_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Configuration text could not be parsed.
    #[error("Configuration parse error: {0}")]
    Deserialization(String),

    /// Configuration file could not be read.
    #[error("Cannot read configuration '{path}': {message}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O message.
        message: String,
    },

    /// Domain value error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalysisError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Error types for the Finplan core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing or parsing core domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Unrecognised transaction type label.
    #[error("Unknown transaction type: {label}")]
    UnknownTransactionType {
        /// The label that failed to parse.
        label: String,
    },

    /// Unrecognised fund category label.
    #[error("Unknown fund category: {label}")]
    UnknownFundCategory {
        /// The label that failed to parse.
        label: String,
    },

    /// Unrecognised age group label.
    #[error("Unknown age group: {label} (expected one of 0-20, 20-30, 30-40, 40-50, 50-60, 60+)")]
    UnknownAgeGroup {
        /// The label that failed to parse.
        label: String,
    },

    /// Unrecognised risk profile label.
    #[error("Unknown risk profile: {label} (expected CONSERVATIVE, MODERATE or AGGRESSIVE)")]
    UnknownRiskProfile {
        /// The label that failed to parse.
        label: String,
    },

    /// A transaction field holds an unusable value.
    #[error("Invalid transaction for fund '{fund_code}': {reason}")]
    InvalidTransaction {
        /// Fund code of the offending transaction.
        fund_code: String,
        /// Why the transaction was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid transaction error.
    #[must_use]
    pub fn invalid_transaction(fund_code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTransaction {
            fund_code: fund_code.into(),
            reason: reason.into(),
        }
    }
}

//! Error types for portfolio ingestion.

use finplan_core::CoreError;
use thiserror::Error;

/// A specialized Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while loading a transaction file.
///
/// Record numbers are 1-based and count data rows, not the header.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// The file could not be opened or read.
    #[error("Cannot read '{path}': {message}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O message.
        message: String,
    },

    /// The CSV structure is malformed (wrong column count, bad encoding).
    #[error("Malformed CSV at record {record}: {message}")]
    Csv {
        /// 1-based record number, 0 if unknown.
        record: usize,
        /// Parser message.
        message: String,
    },

    /// A field holds a value that cannot be parsed.
    #[error("Invalid {field} at record {record}: {source}")]
    InvalidField {
        /// 1-based record number.
        record: usize,
        /// Column name.
        field: &'static str,
        /// Domain parse error.
        source: CoreError,
    },

    /// The header lacks a required column.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Column name.
        column: &'static str,
    },
}

impl IngestError {
    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid_field(record: usize, field: &'static str, source: CoreError) -> Self {
        Self::InvalidField {
            record,
            field,
            source,
        }
    }

    /// Record number the error refers to, if any.
    #[must_use]
    pub fn record(&self) -> Option<usize> {
        match self {
            Self::Csv { record, .. } | Self::InvalidField { record, .. } if *record > 0 => {
                Some(*record)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_record() {
        let err = IngestError::invalid_field(
            7,
            "date",
            CoreError::invalid_date("Cannot parse: yesterday"),
        );
        assert_eq!(
            err.to_string(),
            "Invalid date at record 7: Invalid date: Cannot parse: yesterday"
        );
        assert_eq!(err.record(), Some(7));
        assert_eq!(IngestError::MissingColumn { column: "date" }.record(), None);
    }
}

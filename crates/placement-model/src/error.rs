//! Error taxonomy for the preparation stages.

use polars::prelude::PolarsError;
use thiserror::Error;

use crate::kind::ColumnKind;

/// Errors raised at a stage boundary when a precondition is violated.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A flag column held a value outside its fixed vocabulary.
    #[error("unrecognized value '{value}' in column '{column}'")]
    UnrecognizedCategory { column: String, value: String },

    /// No column of the required kind exists.
    #[error("no {kind} columns to process")]
    EmptyColumnSet { kind: ColumnKind },

    /// A fitted encoder was applied to a category it has not seen.
    #[error("unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// A required column is absent.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// A stratum or partition cannot be filled as requested.
    #[error("insufficient data for {context}: {available} rows available, {required} required")]
    InsufficientData {
        context: String,
        available: usize,
        required: usize,
    },

    /// A cell that must hold a value is null.
    #[error("missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    /// A column is declared with a different kind than the stage requires.
    #[error("column '{column}' is {actual}, expected {expected}")]
    ColumnType {
        column: String,
        expected: ColumnKind,
        actual: ColumnKind,
    },

    /// The frame's data and schema disagree about a column.
    #[error("schema mismatch for column '{column}': {message}")]
    SchemaMismatch { column: String, message: String },

    /// A configuration value is out of range.
    #[error("invalid option {name}: {message}")]
    InvalidOption { name: String, message: String },

    #[error("dataframe operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl PrepError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn invalid_option(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;

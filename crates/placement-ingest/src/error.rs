//! Error types for record ingestion.

use std::path::PathBuf;
use thiserror::Error;

use placement_model::PrepError;

/// Errors that can occur while loading records.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV record.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },

    /// No header row.
    #[error("CSV input is empty: {origin}")]
    EmptyCsv { origin: String },

    /// The same header appears twice.
    #[error("duplicate column '{column}' in {origin}")]
    DuplicateColumn { origin: String, column: String },

    /// A declared column is absent from the header row.
    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { origin: String, column: String },

    /// A numeric column holds text that is not a number.
    #[error("invalid number '{value}' in column '{column}' at row {row} of {origin}")]
    InvalidNumber {
        origin: String,
        column: String,
        row: usize,
        value: String,
    },

    /// A boolean column holds an unrecognized token.
    #[error("invalid boolean '{value}' in column '{column}' at row {row} of {origin}")]
    InvalidBoolean {
        origin: String,
        column: String,
        row: usize,
        value: String,
    },

    /// Assembling the record frame failed.
    #[error(transparent)]
    Frame(#[from] PrepError),
}

pub type Result<T> = std::result::Result<T, IngestError>;

//! Error types for loading and saving workspace files.

use std::path::PathBuf;

use tabview_model::ModelError;
use thiserror::Error;

/// Errors that can occur while reading or writing data files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// The extension maps to no known file format.
    #[error("unsupported file type '{extension}': {path}")]
    UnsupportedFileType { path: PathBuf, extension: String },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no value columns next to its key column.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// The key column of a CSV file has a blank cell.
    #[error("missing key in row {row} of {path}")]
    MissingKey { path: PathBuf, row: usize },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Data Errors ===
    /// The file parsed but its contents break a data invariant.
    #[error("invalid data in {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Maps an open/read failure to `FileNotFound` or `FileRead`.
pub(crate) fn read_error(path: &std::path::Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

//! Error types for ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning files into engine inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Malformed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed delimited text.
    #[error("invalid delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to parse a delimited export with Polars.
    #[error("failed to parse {path}: {message}")]
    DelimitedParse { path: PathBuf, message: String },

    /// Delimited file has no header row.
    #[error("no header row in {what}")]
    MissingHeader { what: String },

    // === Format Errors ===
    /// Submission JSON does not have the expected shape.
    #[error("unexpected submission format: {reason}")]
    SubmissionFormat { reason: String },

    /// Mapping entry does not have the expected shape.
    #[error("invalid mapping entry '{key}': {reason}")]
    MappingFormat { key: String, reason: String },

    /// Template column does not have the expected shape.
    #[error("invalid template column '{column}': {reason}")]
    TemplateFormat { column: String, reason: String },

    // === Downstream Errors ===
    #[error(transparent)]
    Model(#[from] sheet_model::ModelError),

    #[error(transparent)]
    Engine(#[from] sheet_map::EngineError),

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

impl IngestError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/mapper.json"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/mapper.json");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }

    #[test]
    fn test_not_found_is_classified() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::read(std::path::Path::new("x.json"), io);
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}

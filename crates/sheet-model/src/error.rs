use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("destination key must not be empty")]
    EmptyDestinationKey,
    #[error("duplicate destination key: {0}")]
    DuplicateDestinationKey(String),
    #[error("template key '{key}' in column '{column}' is not a row position")]
    InvalidTemplateKey { column: String, key: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

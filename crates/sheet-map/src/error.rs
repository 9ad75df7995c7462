//! Error types for the merge and mapping engine.

use std::fmt;

use thiserror::Error;

/// Fatal engine errors. Any of these aborts the run without partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Both merge inputs were empty.
    #[error("{}", empty_source_message(.record.as_deref()))]
    EmptySource { record: Option<String> },

    /// A join key value occurs more than once in one input.
    #[error("join key '{key}' has duplicate value '{value}' in the {table} table")]
    AmbiguousJoin {
        key: String,
        value: String,
        table: JoinSide,
    },

    /// The join key column is absent from a non-empty input.
    #[error("join key '{key}' not found in the {table} table")]
    MissingJoinKey { key: String, table: JoinSide },

    /// A template column carries a key that is not a row position.
    #[error("template column '{column}' has non-positional key '{key}'")]
    TemplateKey { column: String, key: String },

    /// Mapping entries declare different numbers of header levels.
    #[error("mapping entry '{key}' has {found} header levels, expected {expected}")]
    HeaderLevelMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    /// Header relabeling needs at least one header level.
    #[error("header relabeling requires at least one header level")]
    NoHeaderLevels,

    /// Relabel list does not line up with the assembled columns.
    #[error("{labels} column labels supplied for {columns} template columns")]
    LabelCountMismatch { labels: usize, columns: usize },

    /// A table built by the engine violated a model invariant.
    #[error(transparent)]
    Model(sheet_model::ModelError),
}

fn empty_source_message(record: Option<&str>) -> String {
    match record {
        Some(record) => format!("the submission metadata record: {record} is empty"),
        None => "both source tables are empty".to_string(),
    }
}

/// Which side of a merge an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    Primary,
    Secondary,
}

impl fmt::Display for JoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Secondary => f.write_str("secondary"),
        }
    }
}

impl From<sheet_model::ModelError> for EngineError {
    fn from(err: sheet_model::ModelError) -> Self {
        match err {
            sheet_model::ModelError::InvalidTemplateKey { column, key } => {
                Self::TemplateKey { column, key }
            }
            other => Self::Model(other),
        }
    }
}

/// A mapping entry whose source column is absent. Not fatal: the destination
/// column is emitted header-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumnReference {
    pub destination_key: String,
    pub source_column: String,
}

impl fmt::Display for MissingColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column '{}' referenced by '{}' not found in source",
            self.source_column, self.destination_key
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_names_record() {
        let err = EngineError::EmptySource {
            record: Some("abc-123".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "the submission metadata record: abc-123 is empty"
        );
    }

    #[test]
    fn template_key_from_model_error() {
        let err: EngineError = sheet_model::ModelError::InvalidTemplateKey {
            column: "c".to_string(),
            key: "k".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::TemplateKey { .. }));
    }
}

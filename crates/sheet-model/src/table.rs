#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A single scalar cell. Source data is not typed, so every present value is text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    #[default]
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Text used when the cell is written out; missing cells render empty.
    pub fn render(&self) -> &str {
        self.as_str().unwrap_or("")
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    name: String,
    values: Vec<CellValue>,
}

/// An immutable, column-oriented table with unique column names.
///
/// Rows are aligned by position across columns and every column has the same
/// length. Transformations never mutate a table in place; they build a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    columns: Vec<Column>,
}

/// Data rows produced by projection share the source table representation.
pub type RowTable = SourceTable;

impl SourceTable {
    /// Builds a table from named columns, rejecting duplicate names and ragged columns.
    pub fn new(columns: Vec<(String, Vec<CellValue>)>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let expected = columns.first().map_or(0, |(_, values)| values.len());
        let mut out = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if !seen.insert(name.clone()) {
                return Err(ModelError::DuplicateColumn(name));
            }
            if values.len() != expected {
                return Err(ModelError::RaggedColumn {
                    column: name,
                    expected,
                    found: values.len(),
                });
            }
            out.push(Column { name, values });
        }
        Ok(Self { columns: out })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the table has no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |column| column.values.len())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.values.as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.columns
            .iter()
            .map(|column| (column.name.as_str(), column.values.as_slice()))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.column(column).and_then(|values| values.get(row))
    }

    /// Returns a copy of the table without the named columns.
    pub fn without_columns(&self, names: &BTreeSet<String>) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .filter(|column| !names.contains(&column.name))
                .cloned()
                .collect(),
        }
    }

    /// Returns a copy of the table holding only the given rows, in the given order.
    ///
    /// Out-of-range indices become missing cells.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|column| Column {
                    name: column.name.clone(),
                    values: rows
                        .iter()
                        .map(|&row| column.values.get(row).cloned().unwrap_or_default())
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Vec<CellValue> {
        values.iter().copied().map(CellValue::from).collect()
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = SourceTable::new(vec![
            ("id".to_string(), text(&["1"])),
            ("id".to_string(), text(&["2"])),
        ])
        .unwrap_err();
        assert_eq!(err, ModelError::DuplicateColumn("id".to_string()));
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = SourceTable::new(vec![
            ("id".to_string(), text(&["1", "2"])),
            ("val".to_string(), text(&["a"])),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::RaggedColumn { found: 1, .. }));
    }

    #[test]
    fn table_without_rows_is_empty() {
        let table = SourceTable::new(vec![("id".to_string(), Vec::new())]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 1);
        assert!(SourceTable::empty().is_empty());
    }

    #[test]
    fn select_rows_reorders() {
        let table = SourceTable::new(vec![("id".to_string(), text(&["a", "b", "c"]))]).unwrap();
        let picked = table.select_rows(&[2, 0]);
        assert_eq!(picked.column("id").unwrap(), text(&["c", "a"]).as_slice());
    }

    #[test]
    fn cell_renders_missing_as_empty() {
        assert_eq!(CellValue::Missing.render(), "");
        assert_eq!(CellValue::from(Some("x".to_string())).render(), "x");
    }
}

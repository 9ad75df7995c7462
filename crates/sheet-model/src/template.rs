//! Position-indexed template columns.
//!
//! A facility template ships a fixed number of example rows per column. Each
//! column is held as a sparse, ordered association from row position to value
//! so that it can be continued independently of the other columns.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};
use crate::table::CellValue;

/// Reserved non-positional key a template column may carry.
pub const HEADER_KEY: &str = "header";

/// Key of a template cell as it appears in a raw template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKey {
    Header,
    Position(usize),
}

impl TemplateKey {
    /// Parses a raw key; returns `None` for anything that is neither a
    /// non-negative integer nor the reserved header key.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed == HEADER_KEY {
            return Some(Self::Header);
        }
        trimmed.parse::<usize>().ok().map(Self::Position)
    }
}

/// One destination column's accumulated values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRow {
    header: Option<CellValue>,
    cells: BTreeMap<usize, CellValue>,
}

impl TemplateRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(cells: impl IntoIterator<Item = (usize, CellValue)>) -> Self {
        Self {
            header: None,
            cells: cells.into_iter().collect(),
        }
    }

    /// Builds a row from raw string keys, as found in a serialized template.
    pub fn from_raw(
        column: &str,
        entries: impl IntoIterator<Item = (String, CellValue)>,
    ) -> Result<Self> {
        let mut row = Self::new();
        for (key, value) in entries {
            match TemplateKey::parse(&key) {
                Some(TemplateKey::Header) => row.header = Some(value),
                Some(TemplateKey::Position(position)) => {
                    row.cells.insert(position, value);
                }
                None => {
                    return Err(ModelError::InvalidTemplateKey {
                        column: column.to_string(),
                        key,
                    });
                }
            }
        }
        Ok(row)
    }

    pub fn header(&self) -> Option<&CellValue> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn with_header(mut self, value: CellValue) -> Self {
        self.header = Some(value);
        self
    }

    /// Copy of the row with the reserved header slot dropped.
    pub fn without_header(&self) -> Self {
        Self {
            header: None,
            cells: self.cells.clone(),
        }
    }

    pub fn get(&self, position: usize) -> Option<&CellValue> {
        self.cells.get(&position)
    }

    pub fn insert(&mut self, position: usize, value: CellValue) -> Option<CellValue> {
        self.cells.insert(position, value)
    }

    /// Number of positioned cells (the header slot is not counted).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn last_position(&self) -> Option<usize> {
        self.cells.keys().next_back().copied()
    }

    /// First position after the highest occupied one, or 0 for an empty row.
    pub fn next_position(&self) -> usize {
        self.last_position().map_or(0, |last| last + 1)
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CellValue)> {
        self.cells.iter().map(|(position, value)| (*position, value))
    }
}

/// Ordered mapping from destination key to template column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSheet {
    columns: Vec<(String, TemplateRow)>,
}

impl TemplateSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a column, replacing an existing one with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, row: TemplateRow) -> Option<TemplateRow> {
        let key = key.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, row)),
            None => {
                self.columns.push((key, row));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&TemplateRow> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, row)| row)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateRow)> {
        self.columns.iter().map(|(key, row)| (key.as_str(), row))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header-slot labels in column order, when every column carries one.
    pub fn header_labels(&self) -> Option<Vec<String>> {
        if self.columns.is_empty() {
            return None;
        }
        self.columns
            .iter()
            .map(|(_, row)| row.header().and_then(CellValue::as_str).map(str::to_string))
            .collect()
    }

    /// Returns a new sheet where every column of `updates` replaces the column
    /// of the same key; keys unknown to `self` are appended.
    pub fn merged_with(&self, updates: &TemplateSheet) -> Self {
        let mut merged = self.clone();
        for (key, row) in updates.iter() {
            merged.insert(key, row.clone());
        }
        merged
    }
}

impl FromIterator<(String, TemplateRow)> for TemplateSheet {
    fn from_iter<I: IntoIterator<Item = (String, TemplateRow)>>(iter: I) -> Self {
        let mut sheet = Self::new();
        for (key, row) in iter {
            sheet.insert(key, row);
        }
        sheet
    }
}

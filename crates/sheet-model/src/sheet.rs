use serde::{Deserialize, Serialize};

use crate::table::CellValue;

/// Multi-row header block. `rows` is rectangular: every row has `columns.len()` labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HeaderBlock {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Cyclically moves the last `shift` rows to the top.
    #[must_use]
    pub fn rotated(&self, shift: usize) -> Self {
        let mut rows = self.rows.clone();
        if !rows.is_empty() {
            let shift = shift % rows.len();
            rows.rotate_right(shift);
        }
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// Final rectangular spreadsheet: header rows followed by data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl OutputTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Values of the named column, top to bottom. Uses the first column with that label.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

use std::fmt;
use std::path::Path;

use sheet_ingest::Delimiter;
use sheet_model::OutputTable;

use crate::delimited::write_delimited;
use crate::error::Result;
use crate::xlsx::write_xlsx;

/// Output file format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Delimited(Delimiter),
}

impl OutputFormat {
    /// `.xlsx` writes a workbook; other extensions fall back to
    /// [`Delimiter::from_path`].
    pub fn from_path(path: &Path) -> Self {
        let is_xlsx = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if is_xlsx {
            Self::Xlsx
        } else {
            Self::Delimited(Delimiter::from_path(path))
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx => write!(f, "xlsx"),
            Self::Delimited(delimiter) => write!(f, "{delimiter}-separated"),
        }
    }
}

/// Writes the table in the format its extension names.
pub fn write_table(table: &OutputTable, path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path);
    match format {
        OutputFormat::Xlsx => write_xlsx(table, path)?,
        OutputFormat::Delimited(delimiter) => write_delimited(table, path, delimiter)?,
    }
    Ok(format)
}

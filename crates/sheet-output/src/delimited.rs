//! Writes an [`OutputTable`] as delimited text: the column labels, then every
//! row. Missing cells are empty fields.

use std::io::Write;
use std::path::Path;

use sheet_ingest::Delimiter;
use sheet_model::{CellValue, OutputTable};
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, table: &OutputTable) -> csv::Result<()> {
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(CellValue::render))?;
    }
    writer.flush()?;
    Ok(())
}

fn builder(delimiter: Delimiter) -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(delimiter.as_byte()).flexible(true);
    builder
}

/// Renders the table in memory.
pub fn render_delimited(table: &OutputTable, delimiter: Delimiter) -> Result<String> {
    let mut writer = builder(delimiter).from_writer(Vec::new());
    write_rows(&mut writer, table)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| OutputError::Render(csv::Error::from(err.into_error())))?;
    String::from_utf8(bytes).map_err(|_| OutputError::Encoding)
}

/// Writes the table to `path`, creating parent directories as needed.
pub fn write_delimited(table: &OutputTable, path: &Path, delimiter: Delimiter) -> Result<()> {
    ensure_parent_dir(path)?;
    let write_error = |source: csv::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = builder(delimiter).from_path(path).map_err(write_error)?;
    write_rows(&mut writer, table).map_err(write_error)?;
    info!(
        path = %path.display(),
        delimiter = %delimiter,
        rows = table.height(),
        columns = table.width(),
        "wrote spreadsheet"
    );
    Ok(())
}

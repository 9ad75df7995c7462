//! Flat delimited exports: one decorative title line, then a header row and
//! one row per sample.

use std::path::Path;

use polars::prelude::{CsvReadOptions, SerReader};
use sheet_model::SourceTable;
use tracing::info;

use crate::delimiter::Delimiter;
use crate::error::{IngestError, Result};
use crate::polars_utils::dataframe_to_table;

/// Reads a flat export. The first line is skipped, the second names the
/// columns, and every column is read as text.
pub fn read_flat_export(path: &Path, separator: Delimiter) -> Result<SourceTable> {
    read_delimited_table(path, separator, 1)
}

/// Reads a delimited file as text after skipping `skip_rows` leading lines.
/// The next line names the columns.
pub fn read_delimited_table(
    path: &Path,
    separator: Delimiter,
    skip_rows: usize,
) -> Result<SourceTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let parse_error = |e: polars::prelude::PolarsError| IngestError::DelimitedParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(skip_rows)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| options.with_separator(separator.as_byte()))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    let table = dataframe_to_table(&df)?;
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        skip_rows,
        "read delimited table"
    );
    Ok(table)
}

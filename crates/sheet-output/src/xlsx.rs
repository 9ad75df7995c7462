//! Writes an [`OutputTable`] as a single-sheet XLSX workbook: column labels in
//! the first row, then every table row. Missing cells are left blank.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use sheet_model::OutputTable;
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Worksheet name used for the facility sheet.
pub const SHEET_NAME: &str = "Sheet1";

pub fn write_xlsx(table: &OutputTable, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let workbook_error = |source: XlsxError| OutputError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(workbook_error)?;
    fill_sheet(sheet, table).map_err(workbook_error)?;
    workbook.save(path).map_err(workbook_error)?;
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "wrote workbook"
    );
    Ok(())
}

fn fill_sheet(sheet: &mut Worksheet, table: &OutputTable) -> std::result::Result<(), XlsxError> {
    for (row, col, text) in placed_cells(table) {
        sheet.write_string(row_index(row)?, column_index(col)?, text)?;
    }
    Ok(())
}

/// Non-missing cells with their zero-based sheet coordinates. Labels occupy
/// row 0 and table rows follow.
fn placed_cells(table: &OutputTable) -> impl Iterator<Item = (usize, usize, &str)> {
    let labels = table
        .columns
        .iter()
        .enumerate()
        .map(|(col, label)| (0, col, label.as_str()));
    let body = table.rows.iter().enumerate().flat_map(|(offset, row)| {
        row.iter()
            .enumerate()
            .filter_map(move |(col, cell)| cell.as_str().map(|text| (offset + 1, col, text)))
    });
    labels.chain(body)
}

fn row_index(row: usize) -> std::result::Result<u32, XlsxError> {
    u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)
}

fn column_index(col: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

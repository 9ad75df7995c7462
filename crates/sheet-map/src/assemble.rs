//! Final spreadsheet assembly.

use std::collections::BTreeSet;

use sheet_model::{CellValue, HeaderBlock, OutputTable, RowTable, TemplateSheet};
use tracing::debug;

use crate::error::{EngineError, Result};

/// Stacks the header block on top of the data rows.
///
/// Columns are aligned by label: each data column lands under the first
/// unclaimed header column with the same label, and data columns with no
/// counterpart are appended on the right. Cells a side does not provide are
/// left missing.
pub fn assemble(header: &HeaderBlock, rows: &RowTable) -> OutputTable {
    let mut columns = header.columns.clone();
    let mut claimed = vec![false; columns.len()];
    let mut placement = Vec::with_capacity(rows.width());
    for name in rows.column_names() {
        let slot = columns
            .iter()
            .zip(&claimed)
            .position(|(column, taken)| column == name && !taken);
        let index = match slot {
            Some(index) => index,
            None => {
                columns.push(name.to_string());
                claimed.push(false);
                columns.len() - 1
            }
        };
        claimed[index] = true;
        placement.push(index);
    }

    let width = columns.len();
    let mut out = Vec::with_capacity(header.height() + rows.height());
    for labels in &header.rows {
        let mut row: Vec<CellValue> = labels.iter().map(|label| label.as_str().into()).collect();
        row.resize(width, CellValue::Missing);
        out.push(row);
    }
    let data: Vec<&[CellValue]> = rows.columns().map(|(_, values)| values).collect();
    for row_index in 0..rows.height() {
        let mut row = vec![CellValue::Missing; width];
        for (values, &index) in data.iter().zip(&placement) {
            row[index] = values[row_index].clone();
        }
        out.push(row);
    }

    debug!(
        columns = width,
        header_rows = header.height(),
        data_rows = rows.height(),
        "assembled spreadsheet"
    );
    OutputTable { columns, rows: out }
}

/// Transposes template columns into a table with one row per position.
///
/// Rows cover the union of positions across all columns in ascending order;
/// a column without a value at a position gets a missing cell. Columns keep
/// sheet order and are relabeled positionally with `labels` when given.
/// Reserved header slots are not positions and are not rendered.
pub fn assemble_from_dict(sheet: &TemplateSheet, labels: Option<&[String]>) -> Result<OutputTable> {
    let columns: Vec<String> = match labels {
        Some(labels) if labels.len() != sheet.len() => {
            return Err(EngineError::LabelCountMismatch {
                labels: labels.len(),
                columns: sheet.len(),
            });
        }
        Some(labels) => labels.to_vec(),
        None => sheet.keys().map(str::to_string).collect(),
    };

    let positions: BTreeSet<usize> = sheet.iter().flat_map(|(_, row)| row.positions()).collect();
    let rows: Vec<Vec<CellValue>> = positions
        .iter()
        .map(|&position| {
            sheet
                .iter()
                .map(|(_, row)| row.get(position).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    debug!(
        columns = columns.len(),
        rows = rows.len(),
        "assembled template sheet"
    );
    Ok(OutputTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use sheet_model::{SourceTable, TemplateRow};

    use super::*;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().copied().map(CellValue::from).collect()
    }

    #[test]
    fn header_rows_precede_data_rows() {
        let header = HeaderBlock {
            columns: vec!["Sample Name".to_string(), "Depth".to_string()],
            rows: vec![vec!["samp_name".to_string(), "depth".to_string()]],
        };
        let rows = SourceTable::new(vec![
            ("Depth".to_string(), cells(&["1", "2"])),
            ("Sample Name".to_string(), cells(&["s1", "s2"])),
        ])
        .unwrap();
        let table = assemble(&header, &rows);
        assert_eq!(table.columns, vec!["Sample Name", "Depth"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0], cells(&["samp_name", "depth"]));
        assert_eq!(table.rows[1], cells(&["s1", "1"]));
        assert_eq!(table.rows[2], cells(&["s2", "2"]));
    }

    #[test]
    fn unmatched_columns_are_appended_and_padded() {
        let header = HeaderBlock {
            columns: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["C1".to_string(), "C2".to_string()]],
        };
        let rows = SourceTable::new(vec![("C1".to_string(), cells(&["v"]))]).unwrap();
        let table = assemble(&header, &rows);
        assert_eq!(table.columns, vec!["A", "B", "C1"]);
        assert_eq!(
            table.rows,
            vec![
                vec![CellValue::from("C1"), CellValue::from("C2"), CellValue::Missing],
                vec![CellValue::Missing, CellValue::Missing, CellValue::from("v")],
            ]
        );
    }

    #[test]
    fn dict_path_pads_short_columns() {
        let mut sheet = TemplateSheet::new();
        sheet.insert(
            "a",
            TemplateRow::from_positions([(0, "x".into()), (1, "y".into()), (2, "z".into())]),
        );
        sheet.insert("b", TemplateRow::from_positions([(1, "q".into())]));
        let labels = vec!["Alpha".to_string(), "Beta".to_string()];
        let table = assemble_from_dict(&sheet, Some(labels.as_slice())).unwrap();
        assert_eq!(table.columns, labels);
        assert_eq!(
            table.rows,
            vec![
                vec![CellValue::from("x"), CellValue::Missing],
                vec![CellValue::from("y"), CellValue::from("q")],
                vec![CellValue::from("z"), CellValue::Missing],
            ]
        );
    }

    #[test]
    fn dict_path_rejects_wrong_label_count() {
        let mut sheet = TemplateSheet::new();
        sheet.insert("a", TemplateRow::new());
        let labels: Vec<String> = Vec::new();
        let err = assemble_from_dict(&sheet, Some(labels.as_slice())).unwrap_err();
        assert_eq!(
            err,
            EngineError::LabelCountMismatch {
                labels: 0,
                columns: 1
            }
        );
    }
}

//! Template loaders. A template maps each column to its cells by position,
//! optionally with a reserved header slot.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use sheet_map::EngineError;
use sheet_model::{CellValue, TemplateRow, TemplateSheet};
use tracing::info;

use crate::cells::json_to_cell;
use crate::delimiter::Delimiter;
use crate::error::{IngestError, Result};

/// Parses `{ column: { "<int>" | "header": value } }`, keeping column order.
pub fn parse_template_json(text: &str) -> Result<TemplateSheet> {
    let document: Value = serde_json::from_str(text)?;
    let object = document
        .as_object()
        .ok_or_else(|| IngestError::TemplateFormat {
            column: "<root>".to_string(),
            reason: "template must be a JSON object".to_string(),
        })?;

    let mut sheet = TemplateSheet::new();
    for (column, cells) in object {
        let cells = cells
            .as_object()
            .ok_or_else(|| IngestError::TemplateFormat {
                column: column.clone(),
                reason: "column must be an object of positions".to_string(),
            })?;
        let row = TemplateRow::from_raw(
            column,
            cells
                .iter()
                .map(|(key, value)| (key.clone(), json_to_cell(value))),
        )
        .map_err(EngineError::from)?;
        sheet.insert(column.as_str(), row);
    }
    Ok(sheet)
}

pub fn load_template_json(path: &Path) -> Result<TemplateSheet> {
    let text = std::fs::read_to_string(path).map_err(|err| IngestError::read(path, err))?;
    let sheet = parse_template_json(&text)?;
    info!(path = %path.display(), columns = sheet.len(), "loaded template");
    Ok(sheet)
}

/// Reads a delimited template: the header row names the columns and each
/// following row is the next position. Empty fields are left out.
pub fn read_template_table<R: Read>(reader: R, separator: Delimiter) -> Result<TemplateSheet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(separator.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestError::MissingHeader {
            what: "template".to_string(),
        });
    }
    let mut rows: Vec<TemplateRow> = vec![TemplateRow::new(); headers.len()];
    for (position, record) in csv_reader.records().enumerate() {
        let record = record?;
        for (row, field) in rows.iter_mut().zip(record.iter()) {
            if !field.is_empty() {
                row.insert(position, CellValue::text(field));
            }
        }
    }
    Ok(headers
        .iter()
        .map(str::to_string)
        .zip(rows)
        .collect())
}

pub fn load_template_table(path: &Path, separator: Delimiter) -> Result<TemplateSheet> {
    let file = std::fs::File::open(path).map_err(|err| IngestError::read(path, err))?;
    let sheet = read_template_table(file, separator)?;
    info!(path = %path.display(), columns = sheet.len(), "loaded template table");
    Ok(sheet)
}

/// Loads a template, choosing the format from the file extension.
pub fn load_template(path: &Path) -> Result<TemplateSheet> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_template_json(path)
    } else {
        load_template_table(path, Delimiter::from_path(path))
    }
}

//! Polars helpers: `AnyValue` rendering and DataFrame to [`SourceTable`] conversion.

use polars::prelude::{AnyValue, DataFrame};
use sheet_model::{CellValue, SourceTable};

use crate::error::Result;

/// Converts a Polars `AnyValue` to its text form. `Null` renders empty.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Converts a Polars `AnyValue` to a cell; only `Null` is missing.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        other => CellValue::Text(any_to_string(other)),
    }
}

/// Formats a float without trailing zeros after the decimal point.
///
/// ```
/// use sheet_ingest::format_numeric;
///
/// assert_eq!(format_numeric(40.0), "40");
/// assert_eq!(format_numeric(1.50), "1.5");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Copies a DataFrame into a [`SourceTable`], preserving column order.
pub fn dataframe_to_table(df: &DataFrame) -> Result<SourceTable> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let mut values = Vec::with_capacity(column.len());
        for row in 0..column.len() {
            values.push(any_to_cell(column.get(row)?));
        }
        columns.push((column.name().to_string(), values));
    }
    Ok(SourceTable::new(columns)?)
}

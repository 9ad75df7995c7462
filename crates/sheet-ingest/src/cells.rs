use serde_json::Value;
use sheet_model::CellValue;

use crate::polars_utils::format_numeric;

/// Renders a JSON scalar as a cell. `null` is missing; arrays and objects
/// keep their compact JSON text.
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::String(text) => CellValue::Text(text.clone()),
        Value::Bool(flag) => CellValue::Text(flag.to_string()),
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                CellValue::Text(number.to_string())
            } else {
                CellValue::Text(number.as_f64().map_or_else(|| number.to_string(), format_numeric))
            }
        }
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

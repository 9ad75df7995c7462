//! Spreadsheet output: delimited text or an XLSX workbook.

mod common;
pub mod delimited;
pub mod error;
pub mod format;
pub mod xlsx;

pub use delimited::{render_delimited, write_delimited};
pub use error::{OutputError, Result};
pub use format::{OutputFormat, write_table};
pub use sheet_ingest::Delimiter;
pub use xlsx::{SHEET_NAME, write_xlsx};

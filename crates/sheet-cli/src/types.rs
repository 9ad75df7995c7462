use std::path::PathBuf;

use sheet_map::MissingColumnReference;

/// Outcome of one spreadsheet run, shown in the summary table.
#[derive(Debug)]
pub struct RunResult {
    pub command: &'static str,
    /// Submission id or input file the rows came from.
    pub source: String,
    pub output: PathBuf,
    pub columns: usize,
    pub header_rows: usize,
    pub data_rows: usize,
    pub missing_references: Vec<MissingColumnReference>,
}

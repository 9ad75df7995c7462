//! End-to-end spreadsheet construction from a mapping and a record set.

use sheet_model::{MappingSpec, OutputTable, SourceTable};
use tracing::{info, info_span};

use crate::assemble::assemble;
use crate::error::{MissingColumnReference, Result};
use crate::header::build_header;
use crate::project::{missing_references, project};

/// Builds a facility spreadsheet from a mapping spec and a unified record set.
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetCreator<'a> {
    spec: &'a MappingSpec,
    records: &'a SourceTable,
}

impl<'a> SpreadsheetCreator<'a> {
    pub fn new(spec: &'a MappingSpec, records: &'a SourceTable) -> Self {
        Self { spec, records }
    }

    /// Header block, then projected rows, then assembly.
    pub fn create_spreadsheet(&self, include_header: bool) -> Result<OutputTable> {
        let span = info_span!("create_spreadsheet", include_header);
        let _guard = span.enter();
        let header = build_header(self.spec, include_header)?;
        let rows = project(self.records, self.spec)?;
        let table = assemble(&header, &rows);
        info!(
            columns = table.width(),
            header_rows = header.height(),
            data_rows = rows.height(),
            "spreadsheet created"
        );
        Ok(table)
    }

    /// Mapping entries whose source column is not in the record set.
    pub fn missing_references(&self) -> Vec<MissingColumnReference> {
        missing_references(self.records, self.spec)
    }
}

//! Projects a unified record set onto the destination columns of a mapping.

use sheet_model::{CellValue, MappingSpec, RowTable, SourceTable};
use tracing::{debug, warn};

use crate::error::{MissingColumnReference, Result};

/// Copies every referenced source column under its entry's preferred label.
///
/// Entries without a source reference, or whose reference is absent from the
/// source, contribute no data column. Column order follows the mapping.
/// When two entries share a label, the later one overwrites the earlier
/// column's values in place.
pub fn project(source: &SourceTable, spec: &MappingSpec) -> Result<RowTable> {
    let mut columns: Vec<(String, Vec<CellValue>)> = Vec::new();
    for entry in spec {
        let Some(reference) = entry.source_reference() else {
            continue;
        };
        let Some(values) = source.column(reference) else {
            warn!(
                destination = entry.destination_key(),
                source_column = reference,
                "source column not found; destination column left header-only"
            );
            continue;
        };
        let label = entry.preferred_label();
        match columns.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, slot)) => {
                debug!(label, "label mapped twice; later entry wins");
                *slot = values.to_vec();
            }
            None => columns.push((label.to_string(), values.to_vec())),
        }
    }
    let rows = SourceTable::new(columns)?;
    debug!(
        columns = rows.width(),
        rows = rows.height(),
        "projected data rows"
    );
    Ok(rows)
}

/// Lists entries whose source reference names a column absent from `source`.
pub fn missing_references(source: &SourceTable, spec: &MappingSpec) -> Vec<MissingColumnReference> {
    spec.iter()
        .filter_map(|entry| {
            let reference = entry.source_reference()?;
            if source.has_column(reference) {
                None
            } else {
                Some(MissingColumnReference {
                    destination_key: entry.destination_key().to_string(),
                    source_column: reference.to_string(),
                })
            }
        })
        .collect()
}

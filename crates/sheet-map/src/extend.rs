//! Sub-port augmentation: growing fixed-shape template columns with rows
//! pulled from a variable-length secondary table.

use sheet_model::{SourceTable, SubPortMapping, TemplateSheet};
use tracing::debug;

/// Extends template columns with secondary data, each column continuing its
/// own position sequence.
///
/// For every template column that has a source set in `sub_mapping` and whose
/// source exists in `secondary`, the secondary values are appended starting
/// at the column's next free position, in secondary row order. The reserved
/// header slot is dropped from extended columns; a source with no rows leaves
/// the column untouched. Only extended columns are returned; merge them back
/// with [`TemplateSheet::merged_with`].
pub fn extend(
    sub_mapping: &SubPortMapping,
    secondary: &SourceTable,
    template: &TemplateSheet,
) -> TemplateSheet {
    let mut extended = TemplateSheet::new();
    for (key, existing) in template.iter() {
        let Some(source) = sub_mapping.source_for(key) else {
            continue;
        };
        let Some(values) = secondary.column(source) else {
            debug!(
                destination = key,
                source_column = source,
                "secondary column not found; template column left as is"
            );
            continue;
        };
        if values.is_empty() {
            continue;
        }
        let mut row = existing.without_header();
        let start = row.next_position();
        for (offset, value) in values.iter().enumerate() {
            row.insert(start + offset, value.clone());
        }
        debug!(
            destination = key,
            source_column = source,
            start,
            appended = values.len(),
            "extended template column"
        );
        extended.insert(key, row);
    }
    extended
}

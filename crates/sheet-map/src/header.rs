//! Multi-row header block derived from a mapping.

use sheet_model::{HeaderBlock, MappingSpec};
use tracing::debug;

use crate::error::{EngineError, Result};

/// Builds the header block: one column per mapping entry, one row per header level.
///
/// With `include_header`, the last level row becomes the column labels, the
/// destination keys are kept as a data row, and that row is rotated to the top.
pub fn build_header(spec: &MappingSpec, include_header: bool) -> Result<HeaderBlock> {
    let level_count = uniform_level_count(spec)?;
    let columns: Vec<String> = spec.keys().map(str::to_string).collect();
    let rows: Vec<Vec<String>> = (0..level_count)
        .map(|level| {
            spec.iter()
                .map(|entry| entry.header_levels()[level].label.clone())
                .collect()
        })
        .collect();
    let block = HeaderBlock { columns, rows };

    if !include_header {
        debug!(
            columns = block.width(),
            rows = block.height(),
            "built header block"
        );
        return Ok(block);
    }
    relabel(block)
}

fn relabel(block: HeaderBlock) -> Result<HeaderBlock> {
    let HeaderBlock { columns, mut rows } = block;
    let labels = rows.pop().ok_or(EngineError::NoHeaderLevels)?;
    rows.push(columns);
    let relabeled = HeaderBlock {
        columns: labels,
        rows,
    }
    .rotated(1);
    debug!(
        columns = relabeled.width(),
        rows = relabeled.height(),
        "built relabeled header block"
    );
    Ok(relabeled)
}

/// Every entry must declare the same number of header levels.
fn uniform_level_count(spec: &MappingSpec) -> Result<usize> {
    let mut entries = spec.iter();
    let Some(first) = entries.next() else {
        return Ok(0);
    };
    let expected = first.level_count();
    for entry in entries {
        if entry.level_count() != expected {
            return Err(EngineError::HeaderLevelMismatch {
                key: entry.destination_key().to_string(),
                expected,
                found: entry.level_count(),
            });
        }
    }
    Ok(expected)
}

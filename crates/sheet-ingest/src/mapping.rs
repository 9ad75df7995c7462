//! Loaders for mapping files: the JSON mapping spec and the two-column
//! sub-port mapping.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use sheet_model::{MappingEntry, MappingSpec, SOURCE_REFERENCE_FIELD, SubPortMapping};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

const FACILITY_FIELD_HEADER: &str = "facility field name";
const SOURCE_FIELD_HEADER: &str = "source field name";

/// Parses a mapping spec: a JSON object whose members are destination
/// columns. String fields are header levels in declared order, except
/// `sub_port_mapping` which names the source column.
pub fn parse_mapping_spec(text: &str) -> Result<MappingSpec> {
    let document: Value = serde_json::from_str(text)?;
    let object = document
        .as_object()
        .ok_or_else(|| IngestError::MappingFormat {
            key: "<root>".to_string(),
            reason: "mapping must be a JSON object".to_string(),
        })?;

    let mut entries = Vec::with_capacity(object.len());
    for (key, fields) in object {
        let fields = fields
            .as_object()
            .ok_or_else(|| IngestError::MappingFormat {
                key: key.clone(),
                reason: "entry must be an object".to_string(),
            })?;
        let mut entry = MappingEntry::new(key.as_str())?;
        for (name, value) in fields {
            let value = value.as_str().ok_or_else(|| IngestError::MappingFormat {
                key: key.clone(),
                reason: format!("field '{name}' must be a string"),
            })?;
            entry = if name == SOURCE_REFERENCE_FIELD {
                entry.with_source(value)
            } else {
                entry.with_level(name.as_str(), value)
            };
        }
        entries.push(entry);
    }
    let spec = MappingSpec::new(entries)?;
    debug!(entries = spec.len(), "parsed mapping spec");
    Ok(spec)
}

/// Loads a mapping spec from a JSON file.
pub fn load_mapping_spec(path: &Path) -> Result<MappingSpec> {
    let text = std::fs::read_to_string(path).map_err(|err| IngestError::read(path, err))?;
    let spec = parse_mapping_spec(&text)?;
    info!(path = %path.display(), entries = spec.len(), "loaded mapping spec");
    Ok(spec)
}

/// Reads a tab-separated sub-port mapping. Columns named
/// `facility field name` and `source field name` are used when present,
/// otherwise the first two columns.
pub fn read_sub_port_mapping<R: Read>(reader: R) -> Result<SubPortMapping> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestError::MissingHeader {
            what: "sub-port mapping".to_string(),
        });
    }
    let find = |wanted: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(wanted))
    };
    let (key_index, source_index) = match (find(FACILITY_FIELD_HEADER), find(SOURCE_FIELD_HEADER)) {
        (Some(key), Some(source)) => (key, source),
        _ => (0, 1),
    };

    let mut mapping = SubPortMapping::new();
    for record in csv_reader.records() {
        let record = record?;
        let Some(key) = record.get(key_index).map(str::trim) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let source = record
            .get(source_index)
            .map(|value| value.trim().to_string());
        mapping.insert(key, source);
    }
    Ok(mapping)
}

/// Loads a sub-port mapping file.
pub fn load_sub_port_mapping(path: &Path) -> Result<SubPortMapping> {
    let file = std::fs::File::open(path).map_err(|err| IngestError::read(path, err))?;
    let mapping = read_sub_port_mapping(file)?;
    info!(path = %path.display(), entries = mapping.len(), "loaded sub-port mapping");
    Ok(mapping)
}

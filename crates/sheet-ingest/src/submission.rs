//! Submission metadata: a JSON document holding one record table per
//! `sampleData` key.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};
use sheet_map::TableMerger;
use sheet_model::{CellValue, SourceTable};
use tracing::{debug, info};

use crate::cells::json_to_cell;
use crate::error::{IngestError, Result};

/// `sampleData` key of the soil sample table, the primary side of every merge.
pub const SOIL_DATA_KEY: &str = "soil_data";

/// Facility a spreadsheet is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFacility {
    Emsl,
    JgiMg,
    JgiMt,
}

impl UserFacility {
    pub fn all() -> [Self; 3] {
        [Self::Emsl, Self::JgiMg, Self::JgiMt]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emsl => "emsl",
            Self::JgiMg => "jgi_mg",
            Self::JgiMt => "jgi_mt",
        }
    }

    /// Key of this facility's table under `sampleData`.
    pub fn sample_data_key(self) -> &'static str {
        match self {
            Self::Emsl => "emsl_data",
            Self::JgiMg => "jgi_mg_data",
            Self::JgiMt => "jgi_mt_data",
        }
    }
}

impl fmt::Display for UserFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserFacility {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|facility| facility.as_str() == wanted)
            .ok_or_else(|| IngestError::SubmissionFormat {
                reason: format!("unknown user facility '{s}'"),
            })
    }
}

/// Parsed submission: its id and one table per `sampleData` key.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    id: String,
    tables: Vec<(String, SourceTable)>,
}

impl Submission {
    /// Reads `metadata_submission.sampleData` from a submission document.
    pub fn from_json(id: impl Into<String>, document: &Value) -> Result<Self> {
        let id = id.into();
        let sample_data = document
            .get("metadata_submission")
            .and_then(|meta| meta.get("sampleData"))
            .ok_or_else(|| IngestError::SubmissionFormat {
                reason: "missing metadata_submission.sampleData".to_string(),
            })?;
        let sample_data = sample_data
            .as_object()
            .ok_or_else(|| IngestError::SubmissionFormat {
                reason: "sampleData is not an object".to_string(),
            })?;

        let mut tables = Vec::with_capacity(sample_data.len());
        for (key, records) in sample_data {
            let table = records_to_table(key, records)?;
            debug!(
                submission = %id,
                table = %key,
                rows = table.height(),
                columns = table.width(),
                "parsed sample data table"
            );
            tables.push((key.clone(), table));
        }
        Ok(Self { id, tables })
    }

    /// Parses a submission from JSON text. The id comes from the top-level
    /// `id` field, or `fallback_id` when there is none.
    pub fn parse(text: &str, fallback_id: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        let id = document
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or(fallback_id)
            .to_string();
        Self::from_json(id, &document)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table(&self, key: &str) -> Option<&SourceTable> {
        self.tables
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, table)| table)
    }

    /// The soil sample table, or an empty table when the submission has none.
    pub fn soil_data(&self) -> SourceTable {
        self.table(SOIL_DATA_KEY)
            .cloned()
            .unwrap_or_else(SourceTable::empty)
    }

    /// The facility's table, or an empty table when the submission has none.
    pub fn facility_data(&self, facility: UserFacility) -> SourceTable {
        self.table(facility.sample_data_key())
            .cloned()
            .unwrap_or_else(SourceTable::empty)
    }

    /// Joins soil data with the facility's table on `unique_field`. Soil
    /// values win on shared columns.
    pub fn unified_records(
        &self,
        facility: UserFacility,
        unique_field: &str,
    ) -> Result<SourceTable> {
        let soil = self.soil_data();
        let facility_table = self.facility_data(facility);
        let merged = TableMerger::new(unique_field)
            .with_record_id(self.id.as_str())
            .merge(&soil, &facility_table)?;
        info!(
            submission = %self.id,
            facility = %facility,
            rows = merged.height(),
            columns = merged.width(),
            "unified submission records"
        );
        Ok(merged)
    }
}

fn records_to_table(key: &str, records: &Value) -> Result<SourceTable> {
    let records = records
        .as_array()
        .ok_or_else(|| IngestError::SubmissionFormat {
            reason: format!("sampleData.{key} is not an array"),
        })?;

    let mut names: Vec<String> = Vec::new();
    let mut objects: Vec<&Map<String, Value>> = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let object = record
            .as_object()
            .ok_or_else(|| IngestError::SubmissionFormat {
                reason: format!("sampleData.{key}[{index}] is not an object"),
            })?;
        for field in object.keys() {
            if !names.iter().any(|name| name == field) {
                names.push(field.clone());
            }
        }
        objects.push(object);
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let values = objects
                .iter()
                .map(|object| object.get(&name).map_or(CellValue::Missing, json_to_cell))
                .collect();
            (name, values)
        })
        .collect();
    Ok(SourceTable::new(columns)?)
}

/// Loads a saved submission document. Without a top-level `id` the file stem
/// names the submission.
pub fn load_submission(path: &Path) -> Result<Submission> {
    let text = std::fs::read_to_string(path).map_err(|err| IngestError::read(path, err))?;
    let fallback = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("submission");
    let submission = Submission::parse(&text, fallback)?;
    info!(
        path = %path.display(),
        submission = submission.id(),
        tables = submission.tables.len(),
        "loaded submission"
    );
    Ok(submission)
}

//! Ingestion for the facility spreadsheet engine.
//!
//! Turns files into engine inputs:
//! - submission JSON into per-table [`SourceTable`](sheet_model::SourceTable)s
//! - flat delimited exports, read with Polars
//! - mapping specs, sub-port mappings and templates

pub mod cells;
pub mod delimiter;
pub mod error;
pub mod flat;
pub mod mapping;
pub mod polars_utils;
pub mod submission;
pub mod template;

pub use cells::json_to_cell;
pub use delimiter::Delimiter;
pub use error::{IngestError, Result};
pub use flat::{read_delimited_table, read_flat_export};
pub use mapping::{
    load_mapping_spec, load_sub_port_mapping, parse_mapping_spec, read_sub_port_mapping,
};
pub use polars_utils::{any_to_cell, any_to_string, dataframe_to_table, format_numeric};
pub use submission::{SOIL_DATA_KEY, Submission, UserFacility, load_submission};
pub use template::{
    load_template, load_template_json, load_template_table, parse_template_json,
    read_template_table,
};

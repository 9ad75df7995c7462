//! Mapping and merge engine for facility spreadsheets.
//!
//! The engine consumes already-parsed tables and mappings and
//! produces in-memory spreadsheets; it performs no file or network IO.
//!
//! # Stages
//!
//! - [`TableMerger`]: joins two source tables on a unique key
//! - [`build_header`]: multi-row header block from a [`MappingSpec`](sheet_model::MappingSpec)
//! - [`project`]: destination data columns from a unified record set
//! - [`extend`]: sub-port augmentation of template columns
//! - [`assemble`] / [`assemble_from_dict`]: final rectangular table
//!
//! # Example
//!
//! ```ignore
//! use sheet_map::{SpreadsheetCreator, TableMerger};
//!
//! let records = TableMerger::new("samp_name")
//!     .with_record_id(&submission_id)
//!     .merge(&soil, &facility)?;
//! let sheet = SpreadsheetCreator::new(&spec, &records).create_spreadsheet(true)?;
//! ```

#![deny(unsafe_code)]

mod assemble;
mod creator;
mod error;
mod extend;
mod header;
mod merge;
mod project;

// === Error Types ===
pub use error::{EngineError, JoinSide, MissingColumnReference, Result};

// === Stages ===
pub use assemble::{assemble, assemble_from_dict};
pub use extend::extend;
pub use header::build_header;
pub use merge::{TableMerger, merge};
pub use project::{missing_references, project};

// === Orchestration ===
pub use creator::SpreadsheetCreator;

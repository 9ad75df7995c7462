pub mod error;
pub mod mapping;
pub mod sheet;
pub mod table;
pub mod template;

pub use error::{ModelError, Result};
pub use mapping::{
    HeaderLevel, MappingEntry, MappingSpec, SOURCE_REFERENCE_FIELD, SubPortMapping,
};
pub use sheet::{HeaderBlock, OutputTable};
pub use table::{CellValue, RowTable, SourceTable};
pub use template::{HEADER_KEY, TemplateKey, TemplateRow, TemplateSheet};

//! CLI library components for the facility spreadsheet builder.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;

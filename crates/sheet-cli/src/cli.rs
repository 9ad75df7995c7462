//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheet_ingest::UserFacility;

#[derive(Parser)]
#[command(
    name = "facility-sheet",
    version,
    about = "Build user facility spreadsheets from sample metadata",
    long_about = "Build user facility spreadsheets from sample metadata.\n\n\
                  Merges a submission's soil data with facility-specific data, \
                  projects it through a JSON mapper and writes an XLSX or delimited sheet. \
                  Templates can also be extended with rows from a secondary table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a facility spreadsheet from a saved submission.
    Submission(SubmissionArgs),

    /// Build a facility spreadsheet from a flat delimited export.
    Flat(FlatArgs),

    /// Extend a template with rows from a secondary table.
    Extend(ExtendArgs),

    /// List the supported user facilities.
    Facilities,
}

#[derive(Args)]
pub struct SubmissionArgs {
    /// Path to the submission metadata JSON.
    #[arg(long = "submission-file", short = 's', value_name = "PATH")]
    pub submission_file: PathBuf,

    /// User facility to build the spreadsheet for.
    #[arg(long = "user-facility", short = 'u', value_enum)]
    pub user_facility: UserFacilityArg,

    /// Path to the facility-specific JSON mapper.
    #[arg(long = "mapper", short = 'm', value_name = "PATH")]
    pub mapper: PathBuf,

    /// Field that identifies a record in both sample tables.
    #[arg(long = "unique-field", value_name = "FIELD")]
    pub unique_field: String,

    /// Use the last header level as column labels.
    #[arg(long = "header", overrides_with = "no_header")]
    pub header: bool,

    /// Keep destination keys as column labels (default).
    #[arg(long = "no-header", overrides_with = "header")]
    pub no_header: bool,

    /// Output file; `.xlsx` writes a workbook, `.tsv`/`.txt` tab-separated text, anything else CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct FlatArgs {
    /// Path to the flat export (first line is a title).
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the facility-specific JSON mapper.
    #[arg(long = "mapper", short = 'm', value_name = "PATH")]
    pub mapper: PathBuf,

    /// Use the last header level as column labels.
    #[arg(long = "header", overrides_with = "no_header")]
    pub header: bool,

    /// Keep destination keys as column labels (default).
    #[arg(long = "no-header", overrides_with = "header")]
    pub no_header: bool,

    /// Output file; `.xlsx` writes a workbook, `.tsv`/`.txt` tab-separated text, anything else CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ExtendArgs {
    /// Template as JSON (`{column: {position: value}}`) or a delimited table.
    #[arg(long = "template", short = 't', value_name = "PATH")]
    pub template: PathBuf,

    /// Tab-separated mapping of template columns to secondary columns.
    #[arg(long = "sub-port-mapping", value_name = "PATH")]
    pub sub_port_mapping: PathBuf,

    /// Delimited secondary table supplying the extra rows.
    #[arg(long = "secondary", value_name = "PATH")]
    pub secondary: PathBuf,

    /// Lines to skip before the secondary table's header row.
    #[arg(long = "skip-rows", default_value_t = 0)]
    pub skip_rows: usize,

    /// Output file; `.xlsx` writes a workbook, `.tsv`/`.txt` tab-separated text, anything else CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,
}

impl SubmissionArgs {
    pub fn include_header(&self) -> bool {
        self.header && !self.no_header
    }
}

impl FlatArgs {
    pub fn include_header(&self) -> bool {
        self.header && !self.no_header
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UserFacilityArg {
    Emsl,
    JgiMg,
    JgiMt,
}

impl From<UserFacilityArg> for UserFacility {
    fn from(arg: UserFacilityArg) -> Self {
        match arg {
            UserFacilityArg::Emsl => Self::Emsl,
            UserFacilityArg::JgiMg => Self::JgiMg,
            UserFacilityArg::JgiMt => Self::JgiMt,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

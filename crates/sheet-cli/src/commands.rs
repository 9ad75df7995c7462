use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use sheet_ingest::{
    Delimiter, UserFacility, load_mapping_spec, load_sub_port_mapping, load_submission,
    load_template, read_delimited_table, read_flat_export,
};
use sheet_map::{SpreadsheetCreator, assemble_from_dict, extend};
use sheet_model::{MappingSpec, OutputTable, SourceTable};
use sheet_output::write_table;
use tracing::{info, info_span};

use crate::cli::{ExtendArgs, FlatArgs, SubmissionArgs};
use crate::summary::apply_table_style;
use crate::types::RunResult;

pub fn run_facilities() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Facility", "sampleData key"]);
    apply_table_style(&mut table);
    for facility in UserFacility::all() {
        table.add_row(vec![facility.as_str(), facility.sample_data_key()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_submission(args: &SubmissionArgs) -> Result<RunResult> {
    let start = Instant::now();
    let facility = UserFacility::from(args.user_facility);
    let submission = load_submission(&args.submission_file).with_context(|| {
        format!("load submission {}", args.submission_file.display())
    })?;
    let span = info_span!("submission", id = submission.id(), facility = %facility);
    let _guard = span.enter();

    let records = submission
        .unified_records(facility, &args.unique_field)
        .context("merge sample data")?;
    let spec = load_mapping_spec(&args.mapper)
        .with_context(|| format!("load mapper {}", args.mapper.display()))?;
    let table = build_sheet(&spec, &records, args.include_header())?;
    write_sheet(&table, &args.output, start)?;

    Ok(RunResult {
        command: "submission",
        source: submission.id().to_string(),
        output: args.output.clone(),
        columns: table.width(),
        header_rows: header_rows(&spec),
        data_rows: table.height().saturating_sub(header_rows(&spec)),
        missing_references: SpreadsheetCreator::new(&spec, &records).missing_references(),
    })
}

pub fn run_flat(args: &FlatArgs) -> Result<RunResult> {
    let start = Instant::now();
    let span = info_span!("flat", input = %args.input.display());
    let _guard = span.enter();

    let records = read_flat_export(&args.input, Delimiter::from_path(&args.input))
        .with_context(|| format!("read export {}", args.input.display()))?;
    let spec = load_mapping_spec(&args.mapper)
        .with_context(|| format!("load mapper {}", args.mapper.display()))?;
    let table = build_sheet(&spec, &records, args.include_header())?;
    write_sheet(&table, &args.output, start)?;

    Ok(RunResult {
        command: "flat",
        source: args.input.display().to_string(),
        output: args.output.clone(),
        columns: table.width(),
        header_rows: header_rows(&spec),
        data_rows: table.height().saturating_sub(header_rows(&spec)),
        missing_references: SpreadsheetCreator::new(&spec, &records).missing_references(),
    })
}

pub fn run_extend(args: &ExtendArgs) -> Result<RunResult> {
    let start = Instant::now();
    let span = info_span!("extend", template = %args.template.display());
    let _guard = span.enter();

    let template = load_template(&args.template)
        .with_context(|| format!("load template {}", args.template.display()))?;
    let mapping = load_sub_port_mapping(&args.sub_port_mapping).with_context(|| {
        format!("load sub-port mapping {}", args.sub_port_mapping.display())
    })?;
    let secondary = read_delimited_table(
        &args.secondary,
        Delimiter::from_path(&args.secondary),
        args.skip_rows,
    )
    .with_context(|| format!("read secondary table {}", args.secondary.display()))?;

    let extended = extend(&mapping, &secondary, &template);
    info!(
        extended_columns = extended.len(),
        secondary_rows = secondary.height(),
        "extended template"
    );
    // Extension drops header slots, so labels come from the original template.
    let labels = template.header_labels();
    let merged = template.merged_with(&extended);
    let table =
        assemble_from_dict(&merged, labels.as_deref()).context("assemble template")?;
    write_sheet(&table, &args.output, start)?;

    Ok(RunResult {
        command: "extend",
        source: args.template.display().to_string(),
        output: args.output.clone(),
        columns: table.width(),
        header_rows: 0,
        data_rows: table.height(),
        missing_references: Vec::new(),
    })
}

fn build_sheet(spec: &MappingSpec, records: &SourceTable, include_header: bool) -> Result<OutputTable> {
    SpreadsheetCreator::new(spec, records)
        .create_spreadsheet(include_header)
        .context("build spreadsheet")
}

fn write_sheet(table: &OutputTable, output: &Path, start: Instant) -> Result<()> {
    let format = write_table(table, output)
        .with_context(|| format!("write {}", output.display()))?;
    info!(
        output = %output.display(),
        format = %format,
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "spreadsheet complete"
    );
    Ok(())
}

/// Header levels are uniform across entries, so the first entry decides.
fn header_rows(spec: &MappingSpec) -> usize {
    spec.iter().next().map_or(0, |entry| entry.level_count())
}

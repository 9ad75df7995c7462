use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("{}", summary_table(result));
    if let Some(table) = missing_reference_table(result) {
        println!();
        println!("Header-only columns:");
        println!("{table}");
    }
}

pub fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Command"),
        header_cell("Source"),
        header_cell("Output"),
        header_cell("Columns"),
        header_cell("Header rows"),
        header_cell("Data rows"),
        header_cell("Missing refs"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.command)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&result.source),
        Cell::new(result.output.display()),
        Cell::new(result.columns),
        count_cell(result.header_rows, Color::Cyan),
        Cell::new(result.data_rows),
        count_cell(result.missing_references.len(), Color::Yellow),
    ]);
    table
}

fn missing_reference_table(result: &RunResult) -> Option<Table> {
    if result.missing_references.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Absent source")]);
    apply_table_style(&mut table);
    for missing in &result.missing_references {
        table.add_row(vec![
            Cell::new(&missing.destination_key),
            Cell::new(&missing.source_column).fg(Color::Yellow),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

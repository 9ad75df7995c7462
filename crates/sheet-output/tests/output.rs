use std::fs;

use sheet_model::{CellValue, OutputTable};
use sheet_output::{
    Delimiter, OutputFormat, render_delimited, write_delimited, write_table, write_xlsx,
};
use tempfile::TempDir;

fn relabeled_sheet() -> OutputTable {
    OutputTable {
        columns: vec!["Sample Name".to_string(), "Depth".to_string(), "Notes".to_string()],
        rows: vec![
            vec!["sample_name".into(), "depth".into(), "notes".into()],
            vec!["Sample".into(), "Site".into(), "Other".into()],
            vec!["s1".into(), "0.1".into(), CellValue::Missing],
            vec!["s2".into(), CellValue::Missing, CellValue::Missing],
        ],
    }
}

#[test]
fn tab_rendering_snapshot() {
    let text = render_delimited(&relabeled_sheet(), Delimiter::Tab).unwrap();
    let visible = text.trim_end_matches('\n').replace('\t', "|");
    insta::assert_snapshot!(visible, @r"
    Sample Name|Depth|Notes
    sample_name|depth|notes
    Sample|Site|Other
    s1|0.1|
    s2||
    ");
}

#[test]
fn writes_file_and_creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/nested/sheet.csv");
    write_delimited(&relabeled_sheet(), &path, Delimiter::from_path(&path)).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("Sample Name,Depth,Notes"));
    assert_eq!(written.lines().count(), 5);
    assert!(written.ends_with("s2,,\n"));
}

#[test]
fn writes_xlsx_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sheets/facility.xlsx");
    write_xlsx(&relabeled_sheet(), &path).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"), "workbook is a zip container");
}

#[test]
fn write_table_dispatches_on_extension() {
    let dir = TempDir::new().unwrap();
    let workbook = dir.path().join("out.xlsx");
    let text = dir.path().join("out.tsv");

    assert_eq!(write_table(&relabeled_sheet(), &workbook).unwrap(), OutputFormat::Xlsx);
    assert_eq!(
        write_table(&relabeled_sheet(), &text).unwrap(),
        OutputFormat::Delimited(Delimiter::Tab)
    );
    assert!(fs::read(&workbook).unwrap().starts_with(b"PK"));
    assert!(fs::read_to_string(&text).unwrap().starts_with("Sample Name\tDepth\tNotes\n"));
}

//! Integration tests for the mapping and merge engine.

use std::collections::BTreeSet;

use proptest::prelude::*;

use sheet_map::{
    SpreadsheetCreator, assemble_from_dict, build_header, extend, merge, project,
};
use sheet_model::{
    CellValue, MappingEntry, MappingSpec, SourceTable, SubPortMapping, TemplateRow, TemplateSheet,
};

fn keyed_table(keys: &BTreeSet<u8>, prefix: &str, extra: &str) -> SourceTable {
    let ids: Vec<CellValue> = keys.iter().map(|k| CellValue::text(format!("s{k}"))).collect();
    let vals: Vec<CellValue> = keys
        .iter()
        .map(|k| CellValue::text(format!("{prefix}{k}")))
        .collect();
    SourceTable::new(vec![
        ("id".to_string(), ids),
        ("val".to_string(), vals.clone()),
        (extra.to_string(), vals),
    ])
    .expect("valid table")
}

fn leveled_spec(entries: usize, levels: usize) -> MappingSpec {
    MappingSpec::new(
        (0..entries)
            .map(|e| {
                (0..levels).fold(MappingEntry::new(format!("key{e}")).unwrap(), |entry, l| {
                    entry.with_level(format!("level{l}"), format!("L{l}E{e}"))
                })
            })
            .collect(),
    )
    .expect("valid spec")
}

proptest! {
    #[test]
    fn merge_keeps_intersection_with_primary_precedence(
        primary in prop::collection::btree_set(0u8..50, 1..25),
        secondary in prop::collection::btree_set(0u8..50, 1..25),
    ) {
        let left = keyed_table(&primary, "P", "left_only");
        let right = keyed_table(&secondary, "S", "right_only");
        let merged = merge(&left, &right, "id").unwrap();

        let expected = primary.intersection(&secondary).count();
        prop_assert_eq!(merged.height(), expected);
        prop_assert_eq!(
            merged.column_names().collect::<Vec<_>>(),
            vec!["id", "val", "left_only", "right_only"]
        );
        for value in merged.column("val").unwrap() {
            prop_assert!(value.render().starts_with('P'));
        }
    }

    #[test]
    fn merge_with_empty_side_is_identity(keys in prop::collection::btree_set(0u8..50, 1..25)) {
        let table = keyed_table(&keys, "P", "extra");
        prop_assert_eq!(merge(&table, &SourceTable::empty(), "id").unwrap(), table.clone());
        prop_assert_eq!(merge(&SourceTable::empty(), &table, "anything").unwrap(), table);
    }

    #[test]
    fn plain_header_shape_matches_spec(entries in 1usize..12, levels in 0usize..5) {
        let spec = leveled_spec(entries, levels);
        let block = build_header(&spec, false).unwrap();
        prop_assert_eq!(block.width(), entries);
        prop_assert_eq!(block.height(), levels);
    }

    #[test]
    fn relabeled_rotation_restores_level_order(entries in 1usize..8, levels in 1usize..5) {
        let spec = leveled_spec(entries, levels);
        let plain = build_header(&spec, false).unwrap();
        let relabeled = build_header(&spec, true).unwrap();
        let height = relabeled.height();
        prop_assert_eq!(height, levels);
        prop_assert_eq!(relabeled.rotated(height).rows, relabeled.rows.clone());

        // Rotating the remaining distance moves the key row back to the bottom.
        let restored = relabeled.rotated(height - 1);
        prop_assert_eq!(&restored.rows[..height - 1], &plain.rows[..levels - 1]);
        prop_assert_eq!(&restored.rows[height - 1], &plain.columns);
        prop_assert_eq!(&relabeled.columns, &plain.rows[levels - 1]);
    }

    #[test]
    fn extension_grows_by_secondary_length(
        template_len in 0usize..6,
        secondary_len in 0usize..12,
    ) {
        let mut template = TemplateSheet::new();
        template.insert(
            "colA",
            TemplateRow::from_positions((0..template_len).map(|p| (p, CellValue::text(format!("t{p}"))))),
        );
        let secondary = SourceTable::new(vec![(
            "src".to_string(),
            (0..secondary_len).map(|p| CellValue::text(format!("s{p}"))).collect(),
        )])
        .unwrap();
        let mapping: SubPortMapping = [("colA", Some("src".to_string()))].into_iter().collect();

        let extended = extend(&mapping, &secondary, &template);
        let row = extended.get("colA").unwrap();
        prop_assert_eq!(row.len(), template_len + secondary_len);
    }
}

#[test]
fn concrete_template_extension() {
    let mut template = TemplateSheet::new();
    template.insert(
        "colA",
        TemplateRow::from_positions([(0, "x".into()), (1, "y".into())]),
    );
    let secondary = SourceTable::new(vec![(
        "src".to_string(),
        vec!["p".into(), "q".into(), "q2".into()],
    )])
    .unwrap();
    let mapping: SubPortMapping = [("colA", Some("src".to_string()))].into_iter().collect();

    let merged = template.merged_with(&extend(&mapping, &secondary, &template));
    let expected = TemplateRow::from_positions([
        (0, "x".into()),
        (1, "y".into()),
        (2, "p".into()),
        (3, "q".into()),
        (4, "q2".into()),
    ]);
    assert_eq!(merged.get("colA"), Some(&expected));
}

#[test]
fn extending_again_with_empty_secondary_is_a_no_op() {
    let mut template = TemplateSheet::new();
    template.insert("colA", TemplateRow::from_positions([(0, "x".into())]));
    let mapping: SubPortMapping = [("colA", Some("src".to_string()))].into_iter().collect();
    let secondary =
        SourceTable::new(vec![("src".to_string(), vec!["p".into(), "q".into()])]).unwrap();

    let once = template.merged_with(&extend(&mapping, &secondary, &template));
    let twice = once.merged_with(&extend(&mapping, &SourceTable::empty(), &once));
    assert_eq!(twice, once);

    let no_rows = SourceTable::new(vec![("src".to_string(), Vec::new())]).unwrap();
    let again = once.merged_with(&extend(&mapping, &no_rows, &once));
    assert_eq!(again, once);
}

#[test]
fn extended_template_assembles_with_blank_padding() {
    let mut template = TemplateSheet::new();
    template.insert(
        "sample",
        TemplateRow::from_positions([(0, "example 1".into()), (1, "example 2".into())]),
    );
    template.insert("volume", TemplateRow::from_positions([(0, "10".into())]));
    let secondary = SourceTable::new(vec![(
        "samp_name".to_string(),
        vec!["s1".into(), "s2".into()],
    )])
    .unwrap();
    let mapping: SubPortMapping = [
        ("sample", Some("samp_name".to_string())),
        ("volume", None),
    ]
    .into_iter()
    .collect();

    let merged = template.merged_with(&extend(&mapping, &secondary, &template));
    let table = assemble_from_dict(&merged, None).unwrap();
    assert_eq!(table.columns, vec!["sample", "volume"]);
    assert_eq!(table.height(), 4);
    assert_eq!(table.rows[3], vec![CellValue::from("s2"), CellValue::Missing]);
}

#[test]
fn concrete_header_scenario() {
    let spec = MappingSpec::new(vec![
        MappingEntry::new("A")
            .unwrap()
            .with_level("cat", "C1")
            .with_source("src_a"),
        MappingEntry::new("B").unwrap().with_level("cat", "C2"),
    ])
    .unwrap();
    let block = build_header(&spec, false).unwrap();
    assert_eq!(block.columns, vec!["A", "B"]);
    assert_eq!(block.rows, vec![vec!["C1", "C2"]]);
}

#[test]
fn concrete_merge_scenario() {
    let a = SourceTable::new(vec![
        ("id".to_string(), vec!["r1".into()]),
        ("val".to_string(), vec!["1".into()]),
    ])
    .unwrap();
    let b = SourceTable::new(vec![
        ("id".to_string(), vec!["r1".into()]),
        ("val".to_string(), vec!["2".into()]),
    ])
    .unwrap();
    let merged = merge(&a, &b, "id").unwrap();
    assert_eq!(merged.value(0, "val"), Some(&CellValue::from("1")));
    assert_eq!(merged.width(), 2);
}

#[test]
fn project_emits_only_present_references() {
    let source = SourceTable::new(vec![("present".to_string(), vec!["v".into()])]).unwrap();
    let spec = MappingSpec::new(vec![
        MappingEntry::new("P").unwrap().with_source("present"),
        MappingEntry::new("Q").unwrap().with_source("absent"),
    ])
    .unwrap();
    let rows = project(&source, &spec).unwrap();
    assert_eq!(rows.column_names().collect::<Vec<_>>(), vec!["P"]);
    assert!(!rows.column("P").unwrap().is_empty());
}

#[test]
fn creator_builds_relabeled_sheet() {
    let records = SourceTable::new(vec![
        ("samp_name".to_string(), vec!["s1".into(), "s2".into()]),
        ("depth".to_string(), vec!["0.1".into(), "0.2".into()]),
    ])
    .unwrap();
    let spec = MappingSpec::new(vec![
        MappingEntry::new("sample_name")
            .unwrap()
            .with_level("category", "Sample")
            .with_level("header", "Sample Name")
            .with_source("samp_name"),
        MappingEntry::new("depth")
            .unwrap()
            .with_level("category", "Site")
            .with_level("header", "Depth")
            .with_source("depth"),
        MappingEntry::new("notes")
            .unwrap()
            .with_level("category", "Other")
            .with_level("header", "Notes")
            .with_source("comments"),
    ])
    .unwrap();

    let creator = SpreadsheetCreator::new(&spec, &records);
    let table = creator.create_spreadsheet(true).unwrap();
    assert_eq!(table.columns, vec!["Sample Name", "Depth", "Notes"]);
    let rendered: Vec<Vec<&str>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(CellValue::render).collect())
        .collect();
    assert_eq!(
        rendered,
        vec![
            vec!["sample_name", "depth", "notes"],
            vec!["Sample", "Site", "Other"],
            vec!["s1", "0.1", ""],
            vec!["s2", "0.2", ""],
        ]
    );
    assert_eq!(creator.missing_references().len(), 1);
}

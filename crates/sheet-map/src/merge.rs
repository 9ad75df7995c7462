//! Reconciles two source tables sharing a join key into one record set.

use std::collections::{BTreeSet, HashMap};

use sheet_model::{CellValue, SourceTable};
use tracing::debug;

use crate::error::{EngineError, JoinSide, Result};

/// Inner equi-join of two tables on a single key column.
///
/// When a non-key column exists in both tables the primary table's values are
/// kept and the secondary table's copy is dropped before joining.
#[derive(Debug, Clone)]
pub struct TableMerger {
    join_key: String,
    record_id: Option<String>,
}

impl TableMerger {
    pub fn new(join_key: impl Into<String>) -> Self {
        Self {
            join_key: join_key.into(),
            record_id: None,
        }
    }

    /// Identifier reported when both inputs are empty.
    #[must_use]
    pub fn with_record_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    pub fn merge(&self, primary: &SourceTable, secondary: &SourceTable) -> Result<SourceTable> {
        match (primary.is_empty(), secondary.is_empty()) {
            (true, true) => Err(EngineError::EmptySource {
                record: self.record_id.clone(),
            }),
            (true, false) => Ok(secondary.clone()),
            (false, true) => Ok(primary.clone()),
            (false, false) => self.join(primary, secondary),
        }
    }

    fn join(&self, primary: &SourceTable, secondary: &SourceTable) -> Result<SourceTable> {
        let key = self.join_key.as_str();
        let primary_keys = self.key_column(primary, JoinSide::Primary)?;
        let secondary_keys = self.key_column(secondary, JoinSide::Secondary)?;

        unique_index(key, primary_keys, JoinSide::Primary)?;
        let secondary_index = unique_index(key, secondary_keys, JoinSide::Secondary)?;

        let mut common: BTreeSet<String> = primary
            .column_names()
            .filter(|name| secondary.has_column(name))
            .map(str::to_string)
            .collect();
        common.remove(key);
        if !common.is_empty() {
            debug!(
                join_key = key,
                dropped = ?common,
                "dropping overlapping secondary columns"
            );
        }
        let mut dropped = common;
        dropped.insert(key.to_string());
        let secondary = secondary.without_columns(&dropped);

        let mut left_rows = Vec::new();
        let mut right_rows = Vec::new();
        for (left, value) in primary_keys.iter().enumerate() {
            if let Some(&right) = secondary_index.get(value) {
                left_rows.push(left);
                right_rows.push(right);
            }
        }

        let left = primary.select_rows(&left_rows);
        let right = secondary.select_rows(&right_rows);
        let columns: Vec<(String, Vec<CellValue>)> = left
            .columns()
            .chain(right.columns())
            .map(|(name, values)| (name.to_string(), values.to_vec()))
            .collect();
        let merged = SourceTable::new(columns)?;
        debug!(
            join_key = key,
            primary_rows = primary.height(),
            secondary_rows = secondary_keys.len(),
            merged_rows = merged.height(),
            columns = merged.width(),
            "merged source tables"
        );
        Ok(merged)
    }

    fn key_column<'a>(&self, table: &'a SourceTable, side: JoinSide) -> Result<&'a [CellValue]> {
        table
            .column(&self.join_key)
            .ok_or_else(|| EngineError::MissingJoinKey {
                key: self.join_key.clone(),
                table: side,
            })
    }
}

/// Convenience wrapper over [`TableMerger::merge`].
pub fn merge(primary: &SourceTable, secondary: &SourceTable, join_key: &str) -> Result<SourceTable> {
    TableMerger::new(join_key).merge(primary, secondary)
}

fn unique_index<'a>(
    key: &str,
    values: &'a [CellValue],
    side: JoinSide,
) -> Result<HashMap<&'a CellValue, usize>> {
    let mut index = HashMap::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        if index.insert(value, row).is_some() {
            return Err(EngineError::AmbiguousJoin {
                key: key.to_string(),
                value: value.render().to_string(),
                table: side,
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[(&str, &[&str])]) -> SourceTable {
        SourceTable::new(
            columns
                .iter()
                .map(|(name, values)| {
                    (
                        (*name).to_string(),
                        values.iter().copied().map(CellValue::from).collect(),
                    )
                })
                .collect(),
        )
        .expect("valid table")
    }

    #[test]
    fn primary_wins_on_collision() {
        let soil = table(&[("id", &["s1"]), ("val", &["1"])]);
        let facility = table(&[("id", &["s1"]), ("val", &["2"]), ("depth", &["5"])]);
        let merged = merge(&soil, &facility, "id").unwrap();
        assert_eq!(merged.value(0, "val"), Some(&CellValue::from("1")));
        assert_eq!(merged.value(0, "depth"), Some(&CellValue::from("5")));
        assert_eq!(
            merged.column_names().collect::<Vec<_>>(),
            vec!["id", "val", "depth"]
        );
    }

    #[test]
    fn inner_join_keeps_primary_order() {
        let primary = table(&[("id", &["c", "a", "b"]), ("x", &["3", "1", "2"])]);
        let secondary = table(&[("id", &["a", "c", "z"]), ("y", &["A", "C", "Z"])]);
        let merged = merge(&primary, &secondary, "id").unwrap();
        assert_eq!(merged.height(), 2);
        assert_eq!(
            merged.column("y").unwrap(),
            &[CellValue::from("C"), CellValue::from("A")]
        );
    }

    #[test]
    fn empty_side_returns_other() {
        let primary = table(&[("id", &["a"])]);
        let merged = merge(&primary, &SourceTable::empty(), "id").unwrap();
        assert_eq!(merged, primary);
        let merged = merge(&SourceTable::empty(), &primary, "whatever").unwrap();
        assert_eq!(merged, primary);
    }

    #[test]
    fn both_empty_is_fatal() {
        let err = TableMerger::new("id")
            .with_record_id("sub-1")
            .merge(&SourceTable::empty(), &SourceTable::empty())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::EmptySource {
                record: Some("sub-1".to_string())
            }
        );
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let primary = table(&[("id", &["a", "a"])]);
        let secondary = table(&[("id", &["a"])]);
        let err = merge(&primary, &secondary, "id").unwrap_err();
        assert!(matches!(
            err,
            EngineError::AmbiguousJoin {
                table: JoinSide::Primary,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_secondary_keys_are_rejected() {
        let primary = table(&[("id", &["a", "b"])]);
        let secondary = table(&[("id", &["b", "a", "b"]), ("y", &["1", "2", "3"])]);
        let err = merge(&primary, &secondary, "id").unwrap_err();
        assert_eq!(
            err,
            EngineError::AmbiguousJoin {
                key: "id".to_string(),
                value: "b".to_string(),
                table: JoinSide::Secondary,
            }
        );
    }

    #[test]
    fn repeated_missing_keys_are_ambiguous() {
        let primary = SourceTable::new(vec![
            (
                "id".to_string(),
                vec![CellValue::from("a"), CellValue::Missing, CellValue::Missing],
            ),
            ("x".to_string(), vec!["1".into(), "2".into(), "3".into()]),
        ])
        .unwrap();
        let secondary = table(&[("id", &["a"])]);
        let err = merge(&primary, &secondary, "id").unwrap_err();
        assert_eq!(
            err,
            EngineError::AmbiguousJoin {
                key: "id".to_string(),
                value: String::new(),
                table: JoinSide::Primary,
            }
        );
    }

    #[test]
    fn single_missing_keys_join_each_other() {
        let primary = SourceTable::new(vec![
            ("id".to_string(), vec![CellValue::Missing, "a".into()]),
            ("x".to_string(), vec!["1".into(), "2".into()]),
        ])
        .unwrap();
        let secondary = SourceTable::new(vec![
            ("id".to_string(), vec![CellValue::Missing]),
            ("y".to_string(), vec!["m".into()]),
        ])
        .unwrap();
        let merged = merge(&primary, &secondary, "id").unwrap();
        assert_eq!(merged.height(), 1);
        assert_eq!(merged.value(0, "x"), Some(&CellValue::from("1")));
        assert_eq!(merged.value(0, "y"), Some(&CellValue::from("m")));
    }

    #[test]
    fn missing_key_column_is_reported() {
        let primary = table(&[("id", &["a"])]);
        let secondary = table(&[("other", &["a"])]);
        let err = merge(&primary, &secondary, "id").unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingJoinKey {
                key: "id".to_string(),
                table: JoinSide::Secondary
            }
        );
    }
}

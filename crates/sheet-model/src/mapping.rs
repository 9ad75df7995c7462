//! Declarative mapping from destination spreadsheet columns to header labels
//! and source columns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Field name of the source reference inside a mapping entry.
pub const SOURCE_REFERENCE_FIELD: &str = "sub_port_mapping";

/// One named header level of a destination column, e.g. `("header", "Sample Name")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLevel {
    pub name: String,
    pub label: String,
}

impl HeaderLevel {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Definition of a single destination column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    destination_key: String,
    header_levels: Vec<HeaderLevel>,
    source_reference: Option<String>,
}

impl MappingEntry {
    pub fn new(destination_key: impl Into<String>) -> Result<Self> {
        let destination_key = destination_key.into();
        if destination_key.trim().is_empty() {
            return Err(ModelError::EmptyDestinationKey);
        }
        Ok(Self {
            destination_key,
            header_levels: Vec::new(),
            source_reference: None,
        })
    }

    /// Appends a header level after the existing ones.
    #[must_use]
    pub fn with_level(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.header_levels.push(HeaderLevel::new(name, label));
        self
    }

    /// Sets the source column; a blank name leaves the reference unset.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        self.source_reference = if source.trim().is_empty() {
            None
        } else {
            Some(source)
        };
        self
    }

    pub fn destination_key(&self) -> &str {
        &self.destination_key
    }

    pub fn header_levels(&self) -> &[HeaderLevel] {
        &self.header_levels
    }

    pub fn level_count(&self) -> usize {
        self.header_levels.len()
    }

    pub fn source_reference(&self) -> Option<&str> {
        self.source_reference.as_deref()
    }

    /// Label used for the projected data column: the last header level, or the key.
    pub fn preferred_label(&self) -> &str {
        self.header_levels
            .last()
            .map_or(self.destination_key.as_str(), |level| level.label.as_str())
    }
}

/// Ordered collection of mapping entries. Entry order is output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSpec {
    entries: Vec<MappingEntry>,
}

impl MappingSpec {
    pub fn new(entries: Vec<MappingEntry>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.destination_key.as_str()) {
                return Err(ModelError::DuplicateDestinationKey(
                    entry.destination_key.clone(),
                ));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    pub fn get(&self, destination_key: &str) -> Option<&MappingEntry> {
        self.entries
            .iter()
            .find(|entry| entry.destination_key == destination_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(MappingEntry::destination_key)
    }
}

impl<'a> IntoIterator for &'a MappingSpec {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Destination column to secondary source column, as listed in a two-column
/// sub-port mapping file. `None` means no augmentation for that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubPortMapping {
    entries: Vec<(String, Option<String>)>,
}

impl SubPortMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the source for a destination column. Blank sources are unset.
    pub fn insert(&mut self, destination_key: impl Into<String>, source: Option<String>) {
        let destination_key = destination_key.into();
        let source = source.filter(|value| !value.trim().is_empty());
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == destination_key)
        {
            Some((_, slot)) => *slot = source,
            None => self.entries.push((destination_key, source)),
        }
    }

    /// Source column for a destination key, if one is set.
    pub fn source_for(&self, destination_key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == destination_key)
            .and_then(|(_, source)| source.as_deref())
    }

    pub fn contains_key(&self, destination_key: &str) -> bool {
        self.entries
            .iter()
            .any(|(existing, _)| existing == destination_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, source)| (key.as_str(), source.as_deref()))
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for SubPortMapping {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, source) in iter {
            mapping.insert(key, source);
        }
        mapping
    }
}

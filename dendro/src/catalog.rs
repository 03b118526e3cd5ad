//! Flat, row-ordered catalog of dendrogram structures
//!
//! A [`Catalog`] is the table every stage of the extractor passes around.
//! Selection always produces a fresh copy; the input is never modified.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DendroError;
use crate::structure::StructureRecord;

/// Ordered table of structure records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    rows: Vec<StructureRecord>,
}

impl Catalog {
    /// Create a catalog from rows, keeping their order
    pub fn new(rows: Vec<StructureRecord>) -> Self {
        Self { rows }
    }

    /// Create an empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the catalog has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in order
    pub fn rows(&self) -> &[StructureRecord] {
        &self.rows
    }

    /// Mutable access to the rows (columns may change, row set may not)
    pub fn rows_mut(&mut self) -> &mut [StructureRecord] {
        &mut self.rows
    }

    /// Iterate over rows in order
    pub fn iter(&self) -> impl Iterator<Item = &StructureRecord> {
        self.rows.iter()
    }

    /// Iterate mutably over rows in order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StructureRecord> {
        self.rows.iter_mut()
    }

    /// Copy of the rows satisfying `predicate`, in row order
    pub fn filter<F>(&self, predicate: F) -> Catalog
    where
        F: Fn(&StructureRecord) -> bool,
    {
        Catalog::new(self.rows.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// Row-wise concatenation of several catalogs, preserving all columns
    pub fn vstack(catalogs: &[&Catalog]) -> Catalog {
        let total = catalogs.iter().map(|c| c.len()).sum();
        let mut rows = Vec::with_capacity(total);
        for catalog in catalogs {
            rows.extend(catalog.rows.iter().cloned());
        }
        Catalog::new(rows)
    }

    /// Structure ids in row order
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.idx).collect()
    }

    /// Set of structure ids present in the catalog
    pub fn index_set(&self) -> HashSet<usize> {
        self.rows.iter().map(|r| r.idx).collect()
    }

    /// Look up a row by structure id
    pub fn get_by_idx(&self, idx: usize) -> Option<&StructureRecord> {
        self.rows.iter().find(|r| r.idx == idx)
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), DendroError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, DendroError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl FromIterator<StructureRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = StructureRecord>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a StructureRecord;
    type IntoIter = std::slice::Iter<'a, StructureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

//! Removal of degenerate (nested) structures from a catalog

use std::collections::HashSet;

use log::debug;

use crate::catalog::Catalog;
use crate::dendrogram::Dendrogram;

/// Drop every row whose structure has an ancestor that is also in the
/// catalog, so the surviving rows are mutually exclusive substructures.
///
/// The outermost qualifying structure is kept, and a structure listed more
/// than once (stacked catalogs) keeps only its first row. Columns and relative
/// row order are untouched; only rows are removed. Applying this twice is the
/// same as applying it once.
pub fn reduce_catalog(dendrogram: &Dendrogram, catalog: &Catalog) -> Catalog {
    let present = catalog.index_set();
    let mut seen = HashSet::with_capacity(present.len());

    let reduced: Catalog = catalog
        .iter()
        .filter(|row| !dendrogram.ancestors(row.idx).any(|a| present.contains(&a)))
        .filter(|row| seen.insert(row.idx))
        .cloned()
        .collect();

    debug!(
        "Reduced catalog from {} to {} structures",
        catalog.len(),
        reduced.len()
    );
    reduced
}

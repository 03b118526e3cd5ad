//! Topology statistics for catalog rows

use std::collections::HashMap;

use log::warn;

use crate::catalog::Catalog;
use crate::dendrogram::Dendrogram;

/// Fill `n_descendants` and `fractional_gain` for every row in place.
///
/// `fractional_gain` is the flux of the immediate children divided by the
/// structure's own flux. Leaves get 0. A structure whose own flux is not
/// positive gets NaN, which fails every threshold comparison downstream.
pub fn compute_tree_stats(catalog: &mut Catalog, dendrogram: &Dendrogram) {
    let flux_by_idx: HashMap<usize, f64> = catalog.iter().map(|r| (r.idx, r.flux)).collect();

    for row in catalog.iter_mut() {
        row.n_descendants = dendrogram.descendants(row.idx).len();

        let children = dendrogram.children(row.idx);
        if children.is_empty() {
            row.fractional_gain = 0.0;
            continue;
        }

        let mut children_flux = 0.0;
        for child in children {
            match flux_by_idx.get(child) {
                Some(flux) => children_flux += flux,
                None => warn!(
                    "Structure {} has child {} that is missing from the catalog",
                    row.idx, child
                ),
            }
        }

        row.fractional_gain = if row.flux > 0.0 {
            children_flux / row.flux
        } else {
            f64::NAN
        };
    }
}

//! Detection of structures touching the data cube boundary

use crate::dendrogram::{Dendrogram, NO_STRUCTURE};

/// One flag per structure (in structure-id order): true when any voxel of
/// the structure, or of any of its descendants, lies on a face of the cube.
///
/// Structures cut by the survey boundary have unreliable sizes and fluxes.
pub fn identify_edge_structures(dendrogram: &Dendrogram) -> Vec<bool> {
    let mut on_edge = vec![false; dendrogram.len()];
    let index_map = dendrogram.index_map();
    let (nl, nb, nv) = index_map.dim();

    for ((l, b, v), &idx) in index_map.indexed_iter() {
        if idx == NO_STRUCTURE {
            continue;
        }
        let on_face = l == 0 || b == 0 || v == 0 || l + 1 == nl || b + 1 == nb || v + 1 == nv;
        if on_face {
            on_edge[idx as usize] = true;
        }
    }

    // An ancestor contains every voxel of its descendants
    for idx in 0..dendrogram.len() {
        if on_edge[idx] {
            for ancestor in dendrogram.ancestors(idx) {
                on_edge[ancestor] = true;
            }
        }
    }

    on_edge
}

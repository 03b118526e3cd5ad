//! Loading a dendrogram and its catalog from a JSON snapshot
//!
//! The snapshot stores the index map in the cube's native (v, b, l) axis
//! order. Loading permutes it to (l, b, v) so that the first axis is
//! longitude, matching `x_cen`.

use std::path::Path;

use log::info;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::dendrogram::Dendrogram;
use crate::error::DendroError;
use crate::properties::CatalogMetadata;
use crate::structure::StructureRecord;

/// Axis description of the PPV cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeHeader {
    /// Cube dimensions in (l, b, v) order, filled in on load
    #[serde(default)]
    pub shape: [usize; 3],

    /// Angular pixel size (degrees)
    pub pixel_scale_deg: f64,

    /// Velocity channel width (km/s)
    pub channel_width_kms: f64,
}

/// Serialized dendrogram plus its flat catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DendrogramSnapshot {
    pub header: CubeHeader,

    #[serde(default)]
    pub metadata: CatalogMetadata,

    /// Parent of each structure; position `i` belongs to structure `i`
    pub parents: Vec<Option<usize>>,

    /// One record per structure in id order
    pub structures: Vec<StructureRecord>,

    /// Deepest structure id per voxel in (v, b, l) order, -1 where empty
    pub index_map: Array3<i32>,
}

impl DendrogramSnapshot {
    /// Load from JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, DendroError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), DendroError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Validate a snapshot and split it into hierarchy, catalog, header and
/// metadata, with the index map permuted to (l, b, v).
pub fn load_permute_dendro_catalog(
    snapshot: DendrogramSnapshot,
) -> Result<(Dendrogram, Catalog, CubeHeader, CatalogMetadata), DendroError> {
    let DendrogramSnapshot {
        mut header,
        metadata,
        parents,
        structures,
        index_map,
    } = snapshot;

    if structures.len() != parents.len() {
        return Err(DendroError::RowCountMismatch {
            catalog: structures.len(),
            dendrogram: parents.len(),
        });
    }
    for (position, record) in structures.iter().enumerate() {
        if record.idx != position {
            return Err(DendroError::NonContiguousIds {
                position,
                found: record.idx,
            });
        }
    }

    let lbv = index_map.permuted_axes([2, 1, 0]).as_standard_layout().to_owned();
    let (nl, nb, nv) = lbv.dim();
    header.shape = [nl, nb, nv];

    let dendrogram = Dendrogram::from_parents(&parents, lbv)?;
    let catalog = Catalog::new(structures);

    info!(
        "Loaded {} dendrogram: {} structures, cube {}x{}x{} (l, b, v)",
        metadata.survey,
        dendrogram.len(),
        nl,
        nb,
        nv
    );

    Ok((dendrogram, catalog, header, metadata))
}

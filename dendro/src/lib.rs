//! Dendrogram structure catalogs
//!
//! This crate holds the structure hierarchy of a PPV dendrogram, its flat
//! catalog of structures, and the catalog-level operations the cloud
//! extractor builds on: tree statistics, edge flags, degeneracy reduction,
//! kinematic distances and physical-property assignment.

pub mod catalog;
pub mod dendrogram;
pub mod edges;
pub mod error;
pub mod kinematic_distance;
pub mod properties;
pub mod reduce;
pub mod snapshot;
pub mod structure;
pub mod tree_stats;
pub mod units;

// Re-exports for easier access
pub use catalog::Catalog;
pub use dendrogram::{Dendrogram, NO_STRUCTURE};
pub use edges::identify_edge_structures;
pub use error::DendroError;
pub use kinematic_distance::{make_reid_distance_column, NearFar, RotationCurve};
pub use properties::{assign_properties, CatalogMetadata};
pub use reduce::reduce_catalog;
pub use snapshot::{load_permute_dendro_catalog, CubeHeader, DendrogramSnapshot};
pub use structure::StructureRecord;
pub use tree_stats::compute_tree_stats;

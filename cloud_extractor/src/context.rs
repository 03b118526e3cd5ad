//! Inputs shared by every stage of an extraction run

use dendro::{
    load_permute_dendro_catalog, Catalog, CatalogMetadata, CubeHeader, Dendrogram,
    DendrogramSnapshot,
};

use crate::disambiguator::SizeLinewidthRelation;
use crate::error::ExtractionError;

/// Dendrogram, reference catalog and survey constants for one run.
///
/// Built once and passed by reference into every pipeline; nothing in the
/// context is mutated after construction.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    pub dendrogram: Dendrogram,

    /// Catalog as loaded, before any annotation
    pub catalog: Catalog,

    pub header: CubeHeader,

    pub metadata: CatalogMetadata,

    /// Size–linewidth prior used to resolve near/far distances
    pub relation: SizeLinewidthRelation,
}

impl ExtractionContext {
    pub fn new(
        dendrogram: Dendrogram,
        catalog: Catalog,
        header: CubeHeader,
        metadata: CatalogMetadata,
    ) -> Self {
        Self {
            dendrogram,
            catalog,
            header,
            metadata,
            relation: SizeLinewidthRelation::default(),
        }
    }

    /// Build a context from a dendrogram snapshot
    pub fn from_snapshot(snapshot: DendrogramSnapshot) -> Result<Self, ExtractionError> {
        let (dendrogram, catalog, header, metadata) = load_permute_dendro_catalog(snapshot)?;
        Ok(Self::new(dendrogram, catalog, header, metadata))
    }

    /// Replace the size–linewidth relation
    pub fn with_relation(mut self, relation: SizeLinewidthRelation) -> Self {
        self.relation = relation;
        self
    }
}

//! Errors raised while building a dendrogram and its catalog

use thiserror::Error;

/// Errors that can occur when loading or validating a dendrogram snapshot
#[derive(Error, Debug)]
pub enum DendroError {
    #[error("Structure {idx} references unknown parent {parent}")]
    UnknownParent { idx: usize, parent: usize },

    #[error("Structure ids must be contiguous from 0: found id {found} at position {position}")]
    NonContiguousIds { position: usize, found: usize },

    #[error("Structure {0} is its own ancestor")]
    Cycle(usize),

    #[error("Index map references structure {0}, which is not in the dendrogram")]
    UnknownIndex(i32),

    #[error("Catalog has {catalog} rows but the dendrogram has {dendrogram} structures")]
    RowCountMismatch { catalog: usize, dendrogram: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Errors raised by the cloud extraction pipeline

use dendro::DendroError;
use thiserror::Error;

/// Errors that abort an extraction run
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Structure {idx} has invalid {field}: {value}")]
    InvalidStructure {
        idx: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Dendrogram error: {0}")]
    Dendro(#[from] DendroError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

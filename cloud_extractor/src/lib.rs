//! Molecular cloud extraction for the first Galactic quadrant
//!
//! Candidate clouds are selected from a dendrogram structure catalog in three
//! kinematically distinct regions (positive velocity, negative velocity and
//! the low-velocity Perseus Arm). Each region has its own selection rule,
//! distance treatment and mass cut; the per-region results are stacked and
//! reduced into one composite catalog.

pub mod compiler;
pub mod config;
pub mod context;
pub mod disambiguator;
pub mod error;
pub mod pipeline;
pub mod region;

// Re-exports for easier access
pub use compiler::{
    compile_catalog, compile_firstquad_catalog, first_quad_cloud_catalog, CompilationReport,
};
pub use config::ExtractorConfig;
pub use context::ExtractionContext;
pub use disambiguator::{distance_disambiguator, SizeLinewidthRelation};
pub use error::ExtractionError;
pub use pipeline::{
    get_low_velocity_perseus_clouds, get_negative_velocity_clouds, get_positive_velocity_clouds,
    RegionPipeline,
};
pub use region::{
    Region, RegionRule, DEFAULT_MAX_DESCENDANTS, MAX_FRACTIONAL_GAIN, PERSEUS_MAX_DESCENDANTS,
};

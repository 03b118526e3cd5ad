//! Extraction configuration stored as JSON
//!
//! A configuration lists the region pipelines to run (in stack order) and the
//! size–linewidth relation used to resolve distances. Without a configuration
//! file the first-quadrant defaults are used.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::disambiguator::SizeLinewidthRelation;
use crate::error::ExtractionError;
use crate::pipeline::{default_pipelines, RegionPipeline};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default = "default_pipelines")]
    pub pipelines: Vec<RegionPipeline>,

    #[serde(default)]
    pub size_linewidth: SizeLinewidthRelation,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            pipelines: default_pipelines(),
            size_linewidth: SizeLinewidthRelation::default(),
        }
    }
}

impl ExtractorConfig {
    /// Check the configuration can drive a run
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.pipelines.is_empty() {
            return Err(ExtractionError::Config(
                "at least one region pipeline is required".to_string(),
            ));
        }
        for pipeline in &self.pipelines {
            if pipeline.selection.require.is_empty() {
                return Err(ExtractionError::Config(format!(
                    "pipeline '{}' has no selection criteria",
                    pipeline.name()
                )));
            }
        }
        let SizeLinewidthRelation { constant, power } = self.size_linewidth;
        if !(constant.is_finite() && constant > 0.0 && power.is_finite() && power > 0.0) {
            return Err(ExtractionError::Config(format!(
                "size-linewidth constant and power must be positive, got {constant} and {power}"
            )));
        }
        Ok(())
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ExtractionError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ExtractionError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    ///
    /// A path that cannot be read is an error, never a silent fallback.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ExtractionError> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }
}

//! Per-region cloud extraction pipelines
//!
//! Every region runs the same sequence on its own copy of the base catalog:
//!
//! 1. keep structures passing the region's selection rule,
//! 2. reduce to mutually exclusive structures,
//! 3. for regions affected by the distance ambiguity, pick near or far
//!    distances and recompute physical properties,
//! 4. apply the region's final mass (and distance) cut.
//!
//! In the negative-velocity region distances are single-valued, so the mass
//! and distance computed for the base catalog are used as they are.

use dendro::{assign_properties, reduce_catalog, Catalog};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::context::ExtractionContext;
use crate::disambiguator::distance_disambiguator;
use crate::error::ExtractionError;
use crate::region::{Region, RegionRule};

/// Selection, disambiguation and final cut for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPipeline {
    pub selection: RegionRule,

    /// Resolve near/far distances and recompute properties after reduction
    pub disambiguate: bool,

    pub final_cut: RegionRule,
}

impl RegionPipeline {
    /// Standard pipeline for one of the first-quadrant regions
    pub fn for_region(region: Region, max_descendants: usize) -> Self {
        Self {
            selection: region.selection_rule(max_descendants),
            disambiguate: region.needs_disambiguation(),
            final_cut: region.final_cut(),
        }
    }

    pub fn name(&self) -> &str {
        &self.selection.name
    }

    /// Run the pipeline over `input`, returning the region's cloud catalog.
    ///
    /// An input with no qualifying rows produces an empty catalog.
    pub fn run(
        &self,
        ctx: &ExtractionContext,
        input: &Catalog,
    ) -> Result<Catalog, ExtractionError> {
        debug!("Selecting {}", self.selection);
        let candidates = self.selection.apply(input);
        debug!(
            "{}: {} of {} structures pass selection",
            self.name(),
            candidates.len(),
            input.len()
        );

        let mut reduced = reduce_catalog(&ctx.dendrogram, &candidates);

        if self.disambiguate {
            let best = distance_disambiguator(&reduced, &ctx.relation)?;
            for (row, distance) in reduced.iter_mut().zip(best) {
                row.distance = distance;
            }
            assign_properties(&mut reduced, &ctx.metadata);
        }

        let clouds = self.final_selection(&reduced);
        info!(
            "{}: {} clouds from {} reduced candidates",
            self.name(),
            clouds.len(),
            reduced.len()
        );
        Ok(clouds)
    }

    /// Apply only the final cut
    pub fn final_selection(&self, catalog: &Catalog) -> Catalog {
        self.final_cut.apply(catalog)
    }
}

/// Default pipelines in compile order: negative, positive, Perseus
pub fn default_pipelines() -> Vec<RegionPipeline> {
    [
        Region::NegativeVelocity,
        Region::PositiveVelocity,
        Region::LowVelocityPerseus,
    ]
    .into_iter()
    .map(|region| RegionPipeline::for_region(region, region.default_max_descendants()))
    .collect()
}

/// Clouds of the inner Galaxy (v >= 20 km/s) with mass above 3e4 M☉.
///
/// Default `max_descendants` is [`DEFAULT_MAX_DESCENDANTS`](crate::region::DEFAULT_MAX_DESCENDANTS).
pub fn get_positive_velocity_clouds(
    ctx: &ExtractionContext,
    input: &Catalog,
    max_descendants: usize,
) -> Result<Catalog, ExtractionError> {
    RegionPipeline::for_region(Region::PositiveVelocity, max_descendants).run(ctx, input)
}

/// Clouds of the outer Galaxy (v <= -5 km/s) with mass above 3e3 M☉.
///
/// `max_descendants` is accepted for symmetry with the other regions; the
/// negative-velocity selection does not use it.
pub fn get_negative_velocity_clouds(
    ctx: &ExtractionContext,
    input: &Catalog,
    max_descendants: usize,
) -> Result<Catalog, ExtractionError> {
    RegionPipeline::for_region(Region::NegativeVelocity, max_descendants).run(ctx, input)
}

/// Low-velocity Perseus Arm clouds with mass above 3e4 M☉ and 5 < d < 14 kpc.
///
/// Default `max_descendants` is [`PERSEUS_MAX_DESCENDANTS`](crate::region::PERSEUS_MAX_DESCENDANTS).
pub fn get_low_velocity_perseus_clouds(
    ctx: &ExtractionContext,
    input: &Catalog,
    max_descendants: usize,
) -> Result<Catalog, ExtractionError> {
    RegionPipeline::for_region(Region::LowVelocityPerseus, max_descendants).run(ctx, input)
}

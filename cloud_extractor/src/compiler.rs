//! Base catalog assembly and composite catalog compilation

use dendro::{
    assign_properties, compute_tree_stats, identify_edge_structures, make_reid_distance_column,
    reduce_catalog, Catalog, NearFar,
};
use log::{info, warn};

use crate::context::ExtractionContext;
use crate::error::ExtractionError;
use crate::pipeline::{default_pipelines, RegionPipeline};

/// Annotated copy of the context's catalog that feeds every region pipeline.
///
/// Adds tree statistics, edge flags and both kinematic distance branches.
/// Where the two branches agree the distance is final and physical
/// properties are assigned; everywhere else `distance` stays NaN until a
/// region pipeline resolves it.
pub fn first_quad_cloud_catalog(ctx: &ExtractionContext) -> Catalog {
    let mut catalog = ctx.catalog.clone();

    compute_tree_stats(&mut catalog, &ctx.dendrogram);

    let on_edge = identify_edge_structures(&ctx.dendrogram);
    for row in catalog.iter_mut() {
        match on_edge.get(row.idx) {
            Some(&flag) => row.on_edge = flag,
            None => warn!("Structure {} is not in the dendrogram", row.idx),
        }
    }

    let near = make_reid_distance_column(&catalog, NearFar::Near);
    let far = make_reid_distance_column(&catalog, NearFar::Far);

    let mut unambiguous = 0;
    for ((row, near), far) in catalog.iter_mut().zip(near).zip(far) {
        row.near_distance = near;
        row.far_distance = far;
        row.distance = if row.is_unambiguous() {
            unambiguous += 1;
            near
        } else {
            f64::NAN
        };
    }

    assign_properties(&mut catalog, &ctx.metadata);

    info!(
        "Base catalog: {} structures, {} with unambiguous distances",
        catalog.len(),
        unambiguous
    );
    catalog
}

/// Row counts from one compilation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationReport {
    /// Cloud count per pipeline, in run order
    pub per_region: Vec<(String, usize)>,
    /// Rows after stacking, before the final reduction
    pub stacked: usize,
    /// Rows in the composite catalog
    pub composite: usize,
}

/// Run each pipeline, stack the outputs in order and reduce the result.
pub fn compile_catalog(
    ctx: &ExtractionContext,
    input: &Catalog,
    pipelines: &[RegionPipeline],
) -> Result<(Catalog, CompilationReport), ExtractionError> {
    let mut report = CompilationReport::default();
    let mut outputs = Vec::with_capacity(pipelines.len());

    for pipeline in pipelines {
        let clouds = pipeline.run(ctx, input)?;
        report
            .per_region
            .push((pipeline.name().to_string(), clouds.len()));
        outputs.push(clouds);
    }

    let stacked = Catalog::vstack(&outputs.iter().collect::<Vec<_>>());
    report.stacked = stacked.len();

    let composite = reduce_catalog(&ctx.dendrogram, &stacked);
    report.composite = composite.len();

    info!(
        "Composite catalog: {} clouds ({} before cross-region reduction)",
        report.composite, report.stacked
    );
    Ok((composite, report))
}

/// Composite first-quadrant cloud catalog from the negative-velocity,
/// positive-velocity and low-velocity Perseus pipelines.
pub fn compile_firstquad_catalog(
    ctx: &ExtractionContext,
    input: &Catalog,
) -> Result<Catalog, ExtractionError> {
    let (catalog, _) = compile_catalog(ctx, input, &default_pipelines())?;
    Ok(catalog)
}

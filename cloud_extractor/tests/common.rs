//! Common utilities for cloud extractor tests

#![allow(dead_code)]

use cloud_extractor::{ExtractionContext, SizeLinewidthRelation};
use dendro::units::{Angle, AngleExt, DistanceExt};
use dendro::{
    assign_properties, Catalog, CatalogMetadata, CubeHeader, Dendrogram, StructureRecord,
    NO_STRUCTURE,
};
use ndarray::Array3;

/// Parameters for one synthetic structure
#[derive(Debug, Clone)]
pub struct StructureParams {
    pub idx: usize,
    pub v_cen: f64,
    pub v_rms: f64,
    pub x_cen: f64,
    pub y_cen: f64,
    pub near_kpc: f64,
    pub far_kpc: f64,
    pub flux: f64,
    pub n_descendants: usize,
    pub fractional_gain: f64,
    pub on_edge: bool,
    /// Angular radius in radians; `None` sizes the structure so that its
    /// far-distance size matches the size–linewidth relation
    pub radius_rad: Option<f64>,
}

impl StructureParams {
    pub fn new(idx: usize, v_cen: f64, v_rms: f64, x_cen: f64, y_cen: f64) -> Self {
        Self {
            idx,
            v_cen,
            v_rms,
            x_cen,
            y_cen,
            near_kpc: 5.0,
            far_kpc: 5.0,
            flux: 1.0,
            n_descendants: 0,
            fractional_gain: 0.0,
            on_edge: false,
            radius_rad: None,
        }
    }

    pub fn distances(mut self, near_kpc: f64, far_kpc: f64) -> Self {
        self.near_kpc = near_kpc;
        self.far_kpc = far_kpc;
        self
    }

    pub fn flux(mut self, flux: f64) -> Self {
        self.flux = flux;
        self
    }

    pub fn tree(mut self, n_descendants: usize, fractional_gain: f64) -> Self {
        self.n_descendants = n_descendants;
        self.fractional_gain = fractional_gain;
        self
    }

    pub fn on_edge(mut self) -> Self {
        self.on_edge = true;
        self
    }

    pub fn build(&self) -> StructureRecord {
        let radius_rad = self.radius_rad.unwrap_or_else(|| {
            let expected_pc = SizeLinewidthRelation::default()
                .expected_size(self.v_rms)
                .as_parsecs();
            expected_pc / (self.far_kpc * 1000.0)
        });

        let mut r = StructureRecord::new(
            self.idx,
            self.v_cen,
            self.v_rms,
            self.x_cen,
            self.y_cen,
            Angle::from_radians(radius_rad),
        )
        .with_flux(self.flux);
        r.near_distance = self.near_kpc;
        r.far_distance = self.far_kpc;
        r.n_descendants = self.n_descendants;
        r.fractional_gain = self.fractional_gain;
        r.on_edge = self.on_edge;
        r
    }
}

/// Context over a hierarchy given by `parents`, with an empty index map
pub fn context_with_parents(parents: &[Option<usize>]) -> ExtractionContext {
    let dendrogram =
        Dendrogram::from_parents(parents, Array3::from_elem((4, 4, 4), NO_STRUCTURE)).unwrap();
    ExtractionContext::new(
        dendrogram,
        Catalog::empty(),
        CubeHeader {
            shape: [4, 4, 4],
            pixel_scale_deg: 0.125,
            channel_width_kms: 0.65,
        },
        CatalogMetadata::default(),
    )
}

/// Base catalog built the way the compiler expects it: distances set where
/// near and far agree, and properties assigned to those rows
pub fn base_catalog(params: &[StructureParams], metadata: &CatalogMetadata) -> Catalog {
    let mut catalog: Catalog = params.iter().map(|p| p.build()).collect();
    for row in catalog.iter_mut() {
        row.distance = if row.is_unambiguous() {
            row.near_distance
        } else {
            f64::NAN
        };
    }
    assign_properties(&mut catalog, metadata);
    catalog
}

/// Mass `assign_properties` derives for `flux` at `distance_kpc`
pub fn mass_at(flux: f64, distance_kpc: f64, metadata: &CatalogMetadata) -> f64 {
    let mut row = StructureRecord::new(0, 0.0, 1.0, 0.0, 0.0, Angle::from_degrees(0.1))
        .with_flux(flux);
    row.distance = distance_kpc;
    let mut catalog = Catalog::new(vec![row]);
    assign_properties(&mut catalog, metadata);
    catalog.rows()[0].mass
}

/// A (flux, distance in kpc) pair, with the distance inside `(min_kpc, max_kpc)`,
/// for which the derived mass is exactly `target`.
///
/// Searches the flux values a few ulps around the analytic estimate over a
/// sweep of distances, so the boundary case is reproduced bit for bit.
pub fn exact_mass_inputs(
    target: f64,
    min_kpc: f64,
    max_kpc: f64,
    metadata: &CatalogMetadata,
) -> (f64, f64) {
    const SWEEP: usize = 200;
    for step in 1..SWEEP {
        let distance = min_kpc + (max_kpc - min_kpc) * step as f64 / SWEEP as f64;
        let estimate = target / mass_at(1.0, distance, metadata);
        let start = f64::from_bits(estimate.to_bits() - 16);
        for offset in 0..32 {
            let flux = f64::from_bits(start.to_bits() + offset);
            if mass_at(flux, distance, metadata) == target {
                return (flux, distance);
            }
        }
    }
    panic!("no flux reproduces a mass of exactly {target}");
}

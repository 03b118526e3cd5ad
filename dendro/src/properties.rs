//! Distance-dependent physical properties of structures

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::units::{projected_size, DistanceExt, Length};

/// Gravitational constant in pc (km/s)² / M☉
pub const GRAVITATIONAL_CONSTANT: f64 = 4.302e-3;

/// Galactic CO-to-H2 mass conversion, M☉ (K km/s pc²)⁻¹, including helium
pub const DEFAULT_ALPHA_CO: f64 = 4.35;

/// Survey-level constants needed to turn observables into physical quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    /// Survey name, for logs and output provenance
    pub survey: String,

    /// CO-to-mass conversion factor, M☉ (K km/s pc²)⁻¹
    #[serde(default = "default_alpha_co")]
    pub alpha_co: f64,
}

fn default_alpha_co() -> f64 {
    DEFAULT_ALPHA_CO
}

impl Default for CatalogMetadata {
    fn default() -> Self {
        Self {
            survey: "first quadrant CO".to_string(),
            alpha_co: DEFAULT_ALPHA_CO,
        }
    }
}

/// Compute physical radius, CO luminosity, mass and virial parameter in place.
///
/// Rows without a positive, finite `distance` get NaN for every derived
/// field, which fails any later mass or distance cut.
pub fn assign_properties(catalog: &mut Catalog, metadata: &CatalogMetadata) {
    let deg2_to_sr = std::f64::consts::PI.powi(2) / 180.0_f64.powi(2);
    let mut assigned = 0;

    for row in catalog.iter_mut() {
        if !row.has_valid_distance() {
            row.clear_physical_properties();
            continue;
        }

        let distance = Length::from_kiloparsecs(row.distance);
        let distance_pc = distance.as_parsecs();

        row.physical_radius = projected_size(row.radius, distance).as_parsecs();
        row.luminosity = row.flux * deg2_to_sr * distance_pc * distance_pc;
        row.mass = metadata.alpha_co * row.luminosity;
        row.virial_parameter = 5.0 * row.v_rms.powi(2) * row.physical_radius
            / (GRAVITATIONAL_CONSTANT * row.mass);
        assigned += 1;
    }

    debug!(
        "Assigned physical properties to {} of {} structures",
        assigned,
        catalog.len()
    );
}

//! Near/far kinematic distance disambiguation
//!
//! Picks, per structure, the distance at which its physical size best matches
//! the size expected from its line width under an empirical size–linewidth
//! relation. Structures well off the Galactic plane are assumed to be nearby
//! and always get the near distance.

use dendro::units::{projected_size, DistanceExt, Length};
use dendro::{Catalog, StructureRecord};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Structures with |b| above this (degrees) are forced to the near distance
pub const NEAR_LATITUDE_THRESHOLD: f64 = 1.0;

/// Size–linewidth relation `v_rms = constant * size_pc ^ power`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLinewidthRelation {
    pub constant: f64,
    pub power: f64,
}

impl Default for SizeLinewidthRelation {
    fn default() -> Self {
        Self::SECOND_QUADRANT
    }
}

impl SizeLinewidthRelation {
    /// Fit to second-quadrant clouds, used as a prior in the first quadrant
    pub const SECOND_QUADRANT: SizeLinewidthRelation = SizeLinewidthRelation {
        constant: 0.48293812090592952,
        power: 0.56796770148326814,
    };

    /// Size predicted for a velocity dispersion (km/s)
    pub fn expected_size(&self, v_rms: f64) -> Length {
        Length::from_parsecs((v_rms / self.constant).powf(1.0 / self.power))
    }
}

/// Which candidate distance was chosen, and why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceChoice {
    Near,
    Far,
    /// Near distance forced by high latitude
    NearByLatitude,
}

fn check_preconditions(row: &StructureRecord) -> Result<(), ExtractionError> {
    let radius_deg = row.radius_degrees();
    if !radius_deg.is_finite() || radius_deg < 0.0 {
        return Err(ExtractionError::InvalidStructure {
            idx: row.idx,
            field: "radius",
            value: radius_deg,
        });
    }
    if !row.v_rms.is_finite() || row.v_rms <= 0.0 {
        return Err(ExtractionError::InvalidStructure {
            idx: row.idx,
            field: "v_rms",
            value: row.v_rms,
        });
    }
    Ok(())
}

/// Choose between the near and far distance of one structure.
///
/// Ties in the size deviation go to the near distance.
pub fn choose_distance(
    row: &StructureRecord,
    relation: &SizeLinewidthRelation,
) -> Result<DistanceChoice, ExtractionError> {
    check_preconditions(row)?;

    if row.y_cen.abs() > NEAR_LATITUDE_THRESHOLD {
        return Ok(DistanceChoice::NearByLatitude);
    }

    let expected = relation.expected_size(row.v_rms);
    let near_size = projected_size(row.radius, Length::from_kiloparsecs(row.near_distance));
    let far_size = projected_size(row.radius, Length::from_kiloparsecs(row.far_distance));

    let near_deviation = (near_size - expected).abs();
    let far_deviation = (far_size - expected).abs();

    if near_deviation <= far_deviation {
        Ok(DistanceChoice::Near)
    } else {
        Ok(DistanceChoice::Far)
    }
}

/// Best distance (kpc) for every row, in row order.
///
/// Fails on the first structure with a non-finite or negative radius or a
/// non-positive line width.
pub fn distance_disambiguator(
    catalog: &Catalog,
    relation: &SizeLinewidthRelation,
) -> Result<Vec<f64>, ExtractionError> {
    catalog
        .iter()
        .map(|row| {
            Ok(match choose_distance(row, relation)? {
                DistanceChoice::Near | DistanceChoice::NearByLatitude => row.near_distance,
                DistanceChoice::Far => row.far_distance,
            })
        })
        .collect()
}

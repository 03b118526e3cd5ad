//! A single row of a dendrogram structure catalog

use serde::{Deserialize, Serialize};

use crate::units::{angle_degrees, Angle, AngleExt};

/// One dendrogram structure with its measured and derived attributes.
///
/// Positions are Galactic (`x_cen` = longitude, `y_cen` = latitude, both in
/// degrees), velocities are km/s and distances are kpc. Fields that have not
/// been computed yet hold NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRecord {
    /// Structure id in the dendrogram
    pub idx: usize,

    /// Intensity-weighted central velocity (km/s)
    pub v_cen: f64,

    /// Velocity dispersion (km/s)
    pub v_rms: f64,

    /// Galactic longitude of the centroid (degrees)
    pub x_cen: f64,

    /// Galactic latitude of the centroid (degrees)
    pub y_cen: f64,

    /// Angular radius on the sky
    #[serde(with = "angle_degrees")]
    pub radius: Angle,

    /// Integrated CO emission (K km/s deg²)
    #[serde(default = "nan", with = "nan_as_null")]
    pub flux: f64,

    /// Number of structures below this one in the hierarchy
    #[serde(default)]
    pub n_descendants: usize,

    /// Share of this structure's flux carried by its immediate children
    #[serde(default = "nan", with = "nan_as_null")]
    pub fractional_gain: f64,

    /// Whether the structure touches the boundary of the data cube
    #[serde(default)]
    pub on_edge: bool,

    /// Near kinematic distance (kpc)
    #[serde(default = "nan", with = "nan_as_null")]
    pub near_distance: f64,

    /// Far kinematic distance (kpc)
    #[serde(default = "nan", with = "nan_as_null")]
    pub far_distance: f64,

    /// Resolved heliocentric distance (kpc), NaN while ambiguous
    #[serde(default = "nan", with = "nan_as_null")]
    pub distance: f64,

    /// Molecular gas mass (solar masses)
    #[serde(default = "nan", with = "nan_as_null")]
    pub mass: f64,

    /// Physical radius (pc)
    #[serde(default = "nan", with = "nan_as_null")]
    pub physical_radius: f64,

    /// CO luminosity (K km/s pc²)
    #[serde(default = "nan", with = "nan_as_null")]
    pub luminosity: f64,

    /// Virial parameter (dimensionless)
    #[serde(default = "nan", with = "nan_as_null")]
    pub virial_parameter: f64,
}

fn nan() -> f64 {
    f64::NAN
}

/// JSON has no NaN, so unset values travel as `null`.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl StructureRecord {
    /// Create a record with measured attributes; everything derived is unset.
    pub fn new(idx: usize, v_cen: f64, v_rms: f64, x_cen: f64, y_cen: f64, radius: Angle) -> Self {
        Self {
            idx,
            v_cen,
            v_rms,
            x_cen,
            y_cen,
            radius,
            flux: f64::NAN,
            n_descendants: 0,
            fractional_gain: f64::NAN,
            on_edge: false,
            near_distance: f64::NAN,
            far_distance: f64::NAN,
            distance: f64::NAN,
            mass: f64::NAN,
            physical_radius: f64::NAN,
            luminosity: f64::NAN,
            virial_parameter: f64::NAN,
        }
    }

    /// Set the integrated flux
    pub fn with_flux(mut self, flux: f64) -> Self {
        self.flux = flux;
        self
    }

    /// Whether the kinematic distance is single-valued along this sight line
    pub fn is_unambiguous(&self) -> bool {
        self.near_distance == self.far_distance
    }

    /// Whether `distance` can be used to derive physical properties
    pub fn has_valid_distance(&self) -> bool {
        self.distance.is_finite() && self.distance > 0.0
    }

    /// Clear every distance-dependent field
    pub fn clear_physical_properties(&mut self) {
        self.mass = f64::NAN;
        self.physical_radius = f64::NAN;
        self.luminosity = f64::NAN;
        self.virial_parameter = f64::NAN;
    }

    /// Angular radius in degrees
    pub fn radius_degrees(&self) -> f64 {
        self.radius.as_degrees()
    }
}
